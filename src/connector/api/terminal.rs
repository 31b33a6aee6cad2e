use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::application::{AttachSource, ChatSurface, ChatTransport, ClipboardItem};
use crate::domain::{AttachedFile, Message, Role};

const HELP: &str = "\
Type a message and press Enter to send. End a line with \\ to keep composing.
  /attach <path>...   attach files
  /drop <path>...     attach files as a drop
  /paste <path>...    attach files as a paste
  /remove <n>         remove pending attachment n
  /files              list pending attachments
  /settings           show chat settings
  /set <key> <value>  change a setting (model, temperature, top_p, top_k, role, theme)
  /help               show this help
  /quit               leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalInput {
    /// Enter: submit the composed text plus this line.
    Submit(String),
    /// Line ended with `\`: append and insert a soft newline.
    Continue(String),
    Attach(Vec<PathBuf>, AttachSource),
    Remove(usize),
    Files,
    Settings,
    Set(String, String),
    Help,
    Quit,
    Unknown(String),
}

pub fn parse_line(line: &str) -> TerminalInput {
    let trimmed = line.trim_end_matches(&['\r', '\n'][..]);

    if let Some(rest) = trimmed.strip_prefix('/') {
        let mut parts = rest.split_whitespace();
        let command = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();
        let paths = || args.iter().map(|a| PathBuf::from(*a)).collect::<Vec<_>>();

        return match command {
            "attach" => TerminalInput::Attach(paths(), AttachSource::Picker),
            "drop" => TerminalInput::Attach(paths(), AttachSource::Drop),
            "paste" => TerminalInput::Attach(paths(), AttachSource::Paste),
            "remove" => match args.first().and_then(|n| n.parse::<usize>().ok()) {
                Some(n) if n > 0 => TerminalInput::Remove(n - 1),
                _ => TerminalInput::Unknown(trimmed.to_string()),
            },
            "files" => TerminalInput::Files,
            "settings" => TerminalInput::Settings,
            "set" => match args.as_slice() {
                [key, value] => TerminalInput::Set(key.to_string(), value.to_string()),
                _ => TerminalInput::Unknown(trimmed.to_string()),
            },
            "help" => TerminalInput::Help,
            "quit" | "exit" => TerminalInput::Quit,
            _ => TerminalInput::Unknown(trimmed.to_string()),
        };
    }

    match trimmed.strip_suffix('\\') {
        Some(text) => TerminalInput::Continue(text.to_string()),
        None => TerminalInput::Submit(trimmed.to_string()),
    }
}

pub fn render_message(message: &Message) -> String {
    let speaker = match message.role() {
        Role::User => "you",
        Role::Assistant => "assistant",
    };
    let mut out = format!("{speaker}: {}\n", message.content());
    for file in message.files() {
        out.push_str(&format!(
            "  [file] {} ({}, {} bytes)\n",
            file.name(),
            display_type(file),
            file.size()
        ));
    }
    out
}

fn display_type(file: &AttachedFile) -> &str {
    if file.mime_type().is_empty() {
        "unknown type"
    } else {
        file.mime_type()
    }
}

/// Line-oriented chat client driving a [`ChatSurface`].
pub struct TerminalChat {
    surface: ChatSurface,
    transport: Arc<dyn ChatTransport>,
}

impl TerminalChat {
    pub fn new(surface: ChatSurface, transport: Arc<dyn ChatTransport>) -> Self {
        Self { surface, transport }
    }

    pub fn surface(&self) -> &ChatSurface {
        &self.surface
    }

    pub async fn run<R, W>(&mut self, reader: R, mut out: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        for message in self.surface.transcript().messages() {
            out.write_all(render_message(message).as_bytes()).await?;
        }
        out.flush().await?;

        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            let input = parse_line(&line);
            debug!("Terminal input: {:?}", input);

            let reply = match input {
                TerminalInput::Quit => break,
                TerminalInput::Continue(text) => {
                    self.surface.type_str(&text);
                    self.surface.on_enter(true);
                    String::new()
                }
                TerminalInput::Submit(text) => self.submit(&text).await,
                TerminalInput::Attach(paths, source) => self.attach(paths, source).await,
                TerminalInput::Remove(index) => match self.surface.remove_file(index) {
                    Some(file) => format!("Removed {}\n", file.name()),
                    None => format!("No attachment #{}\n", index + 1),
                },
                TerminalInput::Files => self.render_pending(),
                TerminalInput::Settings => format!("{}\n", self.surface.settings().summary()),
                TerminalInput::Set(key, value) => {
                    match self.surface.settings_mut().set(&key, &value) {
                        Ok(()) => format!("{}\n", self.surface.settings().summary()),
                        Err(e) => format!("{e}\n"),
                    }
                }
                TerminalInput::Help => format!("{HELP}\n"),
                TerminalInput::Unknown(text) => format!("Unknown command: {text}\n"),
            };

            out.write_all(reply.as_bytes()).await?;
            out.flush().await?;
        }

        Ok(())
    }

    async fn submit(&mut self, text: &str) -> String {
        self.surface.type_str(text);

        let before = self.surface.transcript().len();
        let Some(request) = self.surface.on_enter(false) else {
            return "Cannot send without a message.\n".to_string();
        };

        let result = self.transport.send(&request).await;
        self.surface.finish_submit(result);

        // the user message was already on screen as typed input
        self.surface
            .transcript()
            .since(before + 1)
            .iter()
            .map(render_message)
            .collect()
    }

    async fn attach(&mut self, paths: Vec<PathBuf>, source: AttachSource) -> String {
        if paths.is_empty() {
            return "Usage: /attach <path>...\n".to_string();
        }

        let mut out = String::new();
        let mut files = Vec::new();
        for path in paths {
            match AttachedFile::from_path(&path).await {
                Ok(file) => {
                    out.push_str(&format!("Attached {} ({})\n", file.name(), display_type(&file)));
                    files.push(file);
                }
                Err(e) => out.push_str(&format!("Could not attach {}: {e}\n", path.display())),
            }
        }

        match source {
            AttachSource::Paste => self
                .surface
                .paste(files.into_iter().map(ClipboardItem::File).collect()),
            _ => self.surface.attach(files, source),
        }
        out
    }

    fn render_pending(&self) -> String {
        let files = self.surface.pending_files();
        if files.is_empty() {
            return "No pending attachments.\n".to_string();
        }
        files
            .iter()
            .enumerate()
            .map(|(i, f)| format!("{}. {} ({}, {} bytes)\n", i + 1, f.name(), display_type(f), f.size()))
            .collect()
    }
}
