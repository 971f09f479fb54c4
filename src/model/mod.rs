pub(crate) mod series;
pub(crate) mod waveform;
