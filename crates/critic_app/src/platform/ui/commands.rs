use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use critic_core::{Field, ImageData, Language, Msg, UnknownField, UnknownLanguage};
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  artwork <path>        choose the artwork photo
  label <path>          choose the label photo (fills fields by OCR)
  set <field> <value>   edit artist, title, medium, year, dimensions or notes
  submit                analyze the artwork
  lang <en|zh-TW|zh-CN> switch language (translates a shown analysis)
  toggle                switch between summary and full analysis
  save-photo            save the artwork photo
  save                  save the analysis image
  share                 share the analysis image
  another               start over with a new artwork
  dismiss               hide the error message
  help                  show this list
  quit                  leave";

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("unknown command {0:?}, type `help` for the list")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error(transparent)]
    Field(#[from] UnknownField),
    #[error(transparent)]
    Language(#[from] UnknownLanguage),
    #[error("could not read {path}: {source}")]
    ReadImage {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("{0} is not a supported image")]
    NotAnImage(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Artwork(PathBuf),
    Label(PathBuf),
    Set { field: Field, value: String },
    Submit,
    Language(Language),
    Toggle,
    Another,
    Dismiss,
    SavePhoto,
    Save,
    Share,
    Help,
    Quit,
}

/// Parses one input line. Blank lines yield `None`.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "artwork" => Command::Artwork(path_argument("artwork", rest)?),
        "label" => Command::Label(path_argument("label", rest)?),
        "set" => {
            let (name, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            if name.is_empty() {
                return Err(CommandError::MissingArgument("set"));
            }
            Command::Set {
                field: name.parse()?,
                value: value.trim().to_string(),
            }
        }
        "submit" | "analyze" => Command::Submit,
        "lang" | "language" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument("lang"));
            }
            Command::Language(rest.parse()?)
        }
        "toggle" => Command::Toggle,
        "another" | "reset" => Command::Another,
        "dismiss" => Command::Dismiss,
        "save-photo" => Command::SavePhoto,
        "save" => Command::Save,
        "share" => Command::Share,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        _ => return Err(CommandError::Unknown(word.to_string())),
    };
    Ok(Some(command))
}

fn path_argument(command: &'static str, rest: &str) -> Result<PathBuf, CommandError> {
    let unquoted = rest
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(rest);
    if unquoted.is_empty() {
        return Err(CommandError::MissingArgument(command));
    }
    Ok(PathBuf::from(unquoted))
}

/// Reads an image file and detects its MIME type from the content.
pub fn load_image(path: &Path) -> Result<ImageData, CommandError> {
    let bytes = fs::read(path).map_err(|source| CommandError::ReadImage {
        path: path.display().to_string(),
        source,
    })?;
    let format = image::guess_format(&bytes)
        .map_err(|_| CommandError::NotAnImage(path.display().to_string()))?;
    Ok(ImageData::new(bytes, format.to_mime_type()))
}

impl Command {
    /// The session message for this command. `Help` and `Quit` have none.
    pub fn into_msg(self) -> Result<Option<Msg>, CommandError> {
        let msg = match self {
            Command::Artwork(path) => Msg::ArtworkImageSelected(load_image(&path)?),
            Command::Label(path) => Msg::LabelImageSelected(load_image(&path)?),
            Command::Set { field, value } => Msg::FieldEdited { field, value },
            Command::Submit => Msg::SubmitClicked,
            Command::Language(language) => Msg::LanguageSelected(language),
            Command::Toggle => Msg::ToggleFullAnalysis,
            Command::Another => Msg::AnalyzeAnotherClicked,
            Command::Dismiss => Msg::DismissError,
            Command::SavePhoto => Msg::SaveArtworkClicked,
            Command::Save => Msg::SaveAnalysisClicked,
            Command::Share => Msg::ShareClicked,
            Command::Help | Command::Quit => return Ok(None),
        };
        Ok(Some(msg))
    }
}
