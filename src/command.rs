//! Typed messages for the pipeline's external input ports.

/// A value delivered to one of the pipeline's input ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PipelineInput {
    /// Activity trigger. Any non-zero value is a positive edge.
    Trigger(i32),
    /// Ambient mood baseline, `0..=1000`.
    Baseline(i32),
}

impl PipelineInput {
    /// Builds an input from a numbered port as the host delivers it.
    ///
    /// Port 0 carries triggers, port 1 the baseline. Returns `None` for any other port.
    pub fn from_port(port: u8, value: i32) -> Option<Self> {
        match port {
            0 => Some(PipelineInput::Trigger(value)),
            1 => Some(PipelineInput::Baseline(value)),
            _ => None,
        }
    }
}
