use crate::events::AppEvent;
use arcus_core::RingColor;
use async_channel::Sender;
use palette::rgb::FromHexError;
use std::num::{ParseFloatError, ParseIntError};
use std::str::FromStr;
use strum::{Display as StrumDisplay, EnumString};
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, StrumDisplay)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum Keyword {
    Value,
    #[strum(to_string = "max", serialize = "maximum")]
    Max,
    Inner,
    Outer,
    #[strum(to_string = "color", serialize = "colour")]
    Color,
}

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("unknown command '{0}'")]
    Unknown(String),
    #[error("missing argument for '{0}'")]
    MissingArgument(Keyword),
    #[error("unexpected trailing input '{0}'")]
    Trailing(String),
    #[error("invalid integer: {0}")]
    Int(#[from] ParseIntError),
    #[error("invalid number: {0}")]
    Float(#[from] ParseFloatError),
    #[error("invalid color: {0}")]
    Color(#[from] FromHexError),
}

/// Parses one control line such as `value 40` or `color #ff8000`.
///
/// Blank lines and lines starting with `#` yield `None`.
pub fn parse_command(line: &str) -> Result<Option<AppEvent>, CommandError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let keyword =
        Keyword::from_str(head).map_err(|_| CommandError::Unknown(head.to_string()))?;
    let arg = words.next().ok_or(CommandError::MissingArgument(keyword))?;
    if let Some(extra) = words.next() {
        return Err(CommandError::Trailing(extra.to_string()));
    }

    let event = match keyword {
        Keyword::Value => AppEvent::SetValue(arg.parse()?),
        Keyword::Max => AppEvent::SetMaximum(arg.parse()?),
        Keyword::Inner => AppEvent::SetInnerRadius(arg.parse()?),
        Keyword::Outer => AppEvent::SetOuterRadius(arg.parse()?),
        Keyword::Color => AppEvent::SetColor(arg.parse::<RingColor>()?),
    };
    Ok(Some(event))
}

/// Reads control lines from stdin until it closes or the UI goes away.
pub async fn run_stdin_control(tx: Sender<AppEvent>) {
    let reader = BufReader::new(tokio::io::stdin());
    let mut lines = reader.lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                log::error!("Failed to read control input: {}", e);
                break;
            }
        };

        match parse_command(&line) {
            Ok(Some(event)) => {
                if tx.send(event).await.is_err() {
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => log::warn!("Ignoring control line {:?}: {}", line, e),
        }
    }
    log::debug!("control input closed");
}
