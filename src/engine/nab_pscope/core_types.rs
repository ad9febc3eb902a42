use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct FrameNumber(pub u64);
impl FrameNumber
{
    pub fn increment(&mut self) -> Self { self.0 += 1; *self }
}
impl Display for FrameNumber
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result
    {
        Display::fmt(&self.0, f)
    }
}

// Returned by per-frame updates; Completed asks the outer loop to stop
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum CompletionState
{
    InProgress,
    Completed,
}
impl CompletionState
{
    #[inline] #[must_use]
    pub fn is_completed(self) -> bool { self == Self::Completed }
}
