use super::Detection;
use std::{
    fs::File,
    io::{BufWriter, Error, Write},
    path::Path,
};

/// Writes one detection per line.
pub trait SaveToFileFilter<I>
where
    I: Iterator<Item = Detection>,
{
    fn save_to_file(self, path: &Path) -> Result<(), Error>;
}

impl<I> SaveToFileFilter<I> for I
where
    I: Iterator<Item = Detection>,
{
    fn save_to_file(self, path: &Path) -> Result<(), Error> {
        let mut file = BufWriter::new(File::create(path)?);
        for detection in self {
            writeln!(file, "{detection}")?;
        }
        file.flush()
    }
}
