#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub enum ButtonState
{
    #[default]
    Off,
    JustOn, // off->on this frame
    JustOff, // on->off this frame
    On,
}
impl ButtonState
{
    // Advance by one frame given whether the button is currently held
    pub fn set(&mut self, is_on: bool)
    {
        *self = match (*self, is_on)
        {
            (ButtonState::Off, true) => ButtonState::JustOn,
            (ButtonState::Off, false) => ButtonState::Off,
            (ButtonState::JustOn, true) => ButtonState::On,
            (ButtonState::JustOn, false) => ButtonState::JustOff,
            (ButtonState::JustOff, true) => ButtonState::JustOn,
            (ButtonState::JustOff, false) => ButtonState::Off,
            (ButtonState::On, true) => ButtonState::On,
            (ButtonState::On, false) => ButtonState::JustOff,
        }
    }

    pub fn is_on(&self) -> bool
    {
        match *self
        {
            ButtonState::Off => false,
            ButtonState::JustOff => false,
            ButtonState::JustOn => true,
            ButtonState::On => true,
        }
    }

    #[inline] pub fn is_press(&self) -> bool { *self == ButtonState::JustOn }
}
