use anyhow::{Context, Result, bail};
use std::io::{self, IsTerminal, Read};

const MAX_INPUT_SIZE: usize = 64 * 1024; // 64KB

pub struct InputReader;

impl InputReader {
    /// Returns the words given on the command line joined by spaces, or
    /// everything on stdin when no words were given.
    pub fn read(words: &[String]) -> Result<String> {
        let text = if words.is_empty() {
            Self::read_stdin()?
        } else {
            words.join(" ")
        };

        Self::check_size(text.len())?;

        let text = text.trim();
        if text.is_empty() {
            bail!("Input is empty");
        }
        Ok(text.to_string())
    }

    fn check_size(size: usize) -> Result<()> {
        if size > MAX_INPUT_SIZE {
            bail!(
                "Input size ({:.1} KB) exceeds the maximum allowed size (64 KB).\n\n\
                 Consider splitting the text into smaller parts.",
                size as f64 / 1024.0
            );
        }
        Ok(())
    }

    #[allow(clippy::significant_drop_tightening)]
    fn read_stdin() -> Result<String> {
        let stdin = io::stdin();
        if stdin.is_terminal() {
            bail!("No input given.\n\nPass the text as an argument or pipe it on stdin.");
        }

        let mut buffer = Vec::new();
        let mut chunk = [0u8; 8192];
        let mut stdin = stdin.lock();

        loop {
            let bytes_read = stdin
                .read(&mut chunk)
                .context("Failed to read from stdin")?;

            if bytes_read == 0 {
                break;
            }

            buffer.extend_from_slice(&chunk[..bytes_read]);
            Self::check_size(buffer.len())?;
        }

        String::from_utf8(buffer).context("Input is not valid UTF-8")
    }
}
