use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::{Read, Write};
use std::path::Path;

pub trait TomlRead: DeserializeOwned
{
    fn load(reader: &mut impl Read) -> Result<Self, Box<dyn std::error::Error>>
    {
        let mut buf = String::new();
        reader.read_to_string(&mut buf)?;
        Ok(toml::from_str(&buf)?)
    }

    fn load_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>>
    {
        let mut file = std::fs::File::open(path)?;
        Self::load(&mut file)
    }
}
pub trait TomlWrite: Serialize
{
    fn save(&self, prettify: bool, writer: &mut impl Write) -> Result<(), Box<dyn std::error::Error>>
    {
        let toml = match prettify
        {
            true => toml::ser::to_string_pretty(self)?,
            false => toml::ser::to_string(self)?,
        };
        writer.write_all(toml.as_bytes())?;
        Ok(())
    }
}
