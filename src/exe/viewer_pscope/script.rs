use input_pscope::InputContext;
use nab_pscope::TomlRead;
use serde::Deserialize;

// One recorded frame of input; everything but `dt` is handed to the controller as-is
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct ScriptFrame
{
    pub dt: Option<f32>,
    #[serde(flatten)]
    pub input: InputContext,
}

// Input replayed in place of polled devices
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct InputScript
{
    pub frames: Vec<ScriptFrame>,
}
impl TomlRead for InputScript { }
impl InputScript
{
    // Each frame's own dt, or `fallback_dt` if it has none
    pub fn timed_frames(&self, fallback_dt: f32) -> impl Iterator<Item = (f32, &InputContext)>
    {
        self.frames.iter().map(move |f| (f.dt.unwrap_or(fallback_dt), &f.input))
    }
}
