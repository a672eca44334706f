// Console input/output
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::{self, BufRead, IsTerminal, Write};

/// Line-oriented prompt/print surface used by the order commands.
pub trait Console {
    /// Print a line of output
    fn print(&mut self, message: &str) -> io::Result<()>;

    /// Show a prompt and read one line with the trailing newline removed.
    /// Returns `None` once input is exhausted.
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>>;
}

/// Pick the console for stdin: line editing on a terminal, plain reads when
/// input is piped or redirected.
pub fn stdio_console() -> io::Result<Box<dyn Console>> {
    if io::stdin().is_terminal() {
        Ok(Box::new(EditorConsole::new()?))
    } else {
        Ok(Box::new(TerminalConsole::stdio()))
    }
}

/// Interactive console with line editing and history.
pub struct EditorConsole {
    editor: DefaultEditor,
}

impl EditorConsole {
    pub fn new() -> io::Result<Self> {
        let editor = DefaultEditor::new().map_err(readline_to_io)?;
        Ok(Self { editor })
    }
}

fn readline_to_io(err: ReadlineError) -> io::Error {
    match err {
        ReadlineError::Io(e) => e,
        other => io::Error::new(io::ErrorKind::Other, other.to_string()),
    }
}

/// Split a prompt into the lines printed ahead of it and the final line the
/// editor shows; the editor only handles single-line prompts.
fn split_prompt(message: &str) -> (&str, &str) {
    match message.rfind('\n') {
        Some(pos) => message.split_at(pos + 1),
        None => ("", message),
    }
}

impl Console for EditorConsole {
    fn print(&mut self, message: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", message)
    }

    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        let (before, prompt) = split_prompt(message);
        if !before.is_empty() {
            let mut stdout = io::stdout().lock();
            write!(stdout, "{}", before)?;
            stdout.flush()?;
        }

        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(Some(line))
            }
            // Ctrl+C clears the current answer
            Err(ReadlineError::Interrupted) => Ok(Some(String::new())),
            Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(readline_to_io(err)),
        }
    }
}

/// Console over any reader/writer pair; piped stdin/stdout in the binary.
pub struct TerminalConsole<R, W> {
    reader: R,
    writer: W,
}

impl TerminalConsole<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalConsole<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<R: BufRead, W: Write> Console for TerminalConsole<R, W> {
    fn print(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.writer, "{}", message)
    }

    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.writer, "{}", message)?;
        self.writer.flush()?;

        let mut bytes = Vec::new();
        if self.reader.read_until(b'\n', &mut bytes)? == 0 {
            return Ok(None);
        }

        // Undecodable bytes become U+FFFD and fail validation like any bad answer
        let line = String::from_utf8_lossy(&bytes);
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
