//! Command-line flag list → ordered pipeline steps.
//!
//! Flags are processed left to right and every flag consumes a fixed number
//! of values, so `-crop 0 0 10 10 -rotate -45` is unambiguous even though
//! values may start with a dash.

use std::path::PathBuf;
use std::str::FromStr;

use pixel_filters::{Channel, InterpolationMode, Operation};

use crate::error::ProcessError;
use crate::rendering::OutputFormat;

/// One entry of the pipeline, in command-line order.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Transform the current image.
    Filter(Operation),
    /// Write the current image to a file (format by extension).
    Output(PathBuf),
    /// Feed the current image as JPEG to a shell command.
    Pipe(String),
}

/// A parsed command line: one input and the steps that follow it.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub input: PathBuf,
    pub steps: Vec<Step>,
}

impl Invocation {
    /// Parse raw flag tokens such as `["-input", "a.png", "-blur", "-output", "b.png"]`.
    ///
    /// Operation parameters are validated here so a bad value fails before
    /// any file is read.
    pub fn parse<I, S>(tokens: I) -> Result<Self, ProcessError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokens: Vec<String> = tokens.into_iter().map(|t| t.as_ref().to_string()).collect();
        let mut cursor = Cursor {
            tokens: &tokens,
            pos: 0,
        };
        let mut input: Option<PathBuf> = None;
        let mut steps = Vec::new();

        while let Some(token) = cursor.next() {
            let flag = flag_name(token)
                .ok_or_else(|| ProcessError::Usage(format!("expected a flag, found '{token}'")))?;
            match flag {
                "input" => {
                    let path = PathBuf::from(cursor.value(flag)?);
                    if input.replace(path).is_some() {
                        return Err(ProcessError::Usage("-input given more than once".to_string()));
                    }
                }
                "output" => {
                    let path = PathBuf::from(cursor.value(flag)?);
                    OutputFormat::from_path(&path)?;
                    steps.push(Step::Output(path));
                }
                "pipe" => steps.push(Step::Pipe(cursor.value(flag)?.to_string())),
                _ => {
                    let op = parse_operation(flag, &mut cursor)?;
                    op.validate()?;
                    steps.push(Step::Filter(op));
                }
            }
        }

        let input = input.ok_or_else(|| ProcessError::Usage("missing -input <path>".to_string()))?;
        if !steps.iter().any(|s| matches!(s, Step::Output(_) | Step::Pipe(_))) {
            return Err(ProcessError::Usage(
                "nothing to write: add -output <path> or -pipe <command>".to_string(),
            ));
        }
        Ok(Self { input, steps })
    }

    /// The transform steps only, in order.
    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.steps.iter().filter_map(|s| match s {
            Step::Filter(op) => Some(op),
            _ => None,
        })
    }
}

fn flag_name(token: &str) -> Option<&str> {
    let name = token.strip_prefix("--").or_else(|| token.strip_prefix('-'))?;
    (!name.is_empty()).then_some(name)
}

fn parse_operation(flag: &str, cursor: &mut Cursor<'_>) -> Result<Operation, ProcessError> {
    let op = match flag {
        "brighten" => Operation::Brighten(cursor.number(flag)?),
        "contrast" => Operation::Contrast(cursor.number(flag)?),
        "saturation" => Operation::Saturation(cursor.number(flag)?),
        "channel" => Operation::Channel(Channel::from_str(cursor.value(flag)?)?),
        "grayscale" => Operation::Grayscale,
        "quantize" | "quantitize" => Operation::Quantize(cursor.number(flag)?),
        "black-white" => Operation::BlackWhite(cursor.number(flag)?),
        "random-dither" => Operation::RandomDither(cursor.number(flag)?),
        "floyd-steinberg-dither" => Operation::FloydSteinbergDither(cursor.number(flag)?),
        "edge-detect" => Operation::EdgeDetect,
        "edge-detect-base" => Operation::EdgeDetectBase,
        "random-noise" => Operation::RandomNoise,
        "sharpen" => Operation::Sharpen,
        "blur" => Operation::Blur,
        "sample" => Operation::Sample(InterpolationMode::from_str(cursor.value(flag)?)?),
        "crop" => Operation::Crop {
            x: cursor.number(flag)?,
            y: cursor.number(flag)?,
            width: cursor.number(flag)?,
            height: cursor.number(flag)?,
        },
        "rotate" => Operation::Rotate(cursor.number(flag)?),
        "scale" => Operation::Scale(cursor.number(flag)?, cursor.number(flag)?),
        _ => return Err(ProcessError::Usage(format!("unknown flag '-{flag}'"))),
    };
    Ok(op)
}

struct Cursor<'a> {
    tokens: &'a [String],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn next(&mut self) -> Option<&'a str> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token.as_str())
    }

    fn value(&mut self, flag: &str) -> Result<&'a str, ProcessError> {
        self.next()
            .ok_or_else(|| ProcessError::Usage(format!("-{flag} is missing a value")))
    }

    fn number<T: FromStr>(&mut self, flag: &str) -> Result<T, ProcessError> {
        let raw = self.value(flag)?;
        raw.parse()
            .map_err(|_| ProcessError::Usage(format!("-{flag}: '{raw}' is not a valid number")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(line: &str) -> Result<Invocation, ProcessError> {
        Invocation::parse(line.split_whitespace())
    }

    #[test]
    fn test_parse_keeps_flag_order() {
        let inv =
            parse("-input in.png -brighten 2 -crop 1 2 3 4 -output a.png -rotate -45 -output b.jpg")
                .unwrap();

        assert_eq!(inv.input, PathBuf::from("in.png"));
        assert_eq!(
            inv.steps,
            vec![
                Step::Filter(Operation::Brighten(2.0)),
                Step::Filter(Operation::Crop { x: 1, y: 2, width: 3, height: 4 }),
                Step::Output(PathBuf::from("a.png")),
                Step::Filter(Operation::Rotate(-45.0)),
                Step::Output(PathBuf::from("b.jpg")),
            ]
        );
    }

    #[test]
    fn test_parse_every_operation_flag() {
        let inv = parse(
            "-input i.png -contrast 1.5 -saturation 0 -channel red -grayscale -quantitize 3 \
             -black-white 0.5 -random-dither 1 -floyd-steinberg-dither 2 -edge-detect \
             -edge-detect-base -random-noise -sharpen -blur -sample gaussian -scale 2 0.5 \
             -output o.png",
        )
        .unwrap();
        let ops: Vec<Operation> = inv.operations().copied().collect();
        assert_eq!(
            ops,
            vec![
                Operation::Contrast(1.5),
                Operation::Saturation(0.0),
                Operation::Channel(Channel::Red),
                Operation::Grayscale,
                Operation::Quantize(3),
                Operation::BlackWhite(0.5),
                Operation::RandomDither(1),
                Operation::FloydSteinbergDither(2),
                Operation::EdgeDetect,
                Operation::EdgeDetectBase,
                Operation::RandomNoise,
                Operation::Sharpen,
                Operation::Blur,
                Operation::Sample(InterpolationMode::Gaussian),
                Operation::Scale(2.0, 0.5),
            ]
        );
    }

    #[test]
    fn test_pipe_takes_one_token() {
        let inv = Invocation::parse(["-input", "i.png", "-pipe", "cat > /dev/null"]).unwrap();
        assert_eq!(inv.steps, vec![Step::Pipe("cat > /dev/null".to_string())]);
    }

    #[test]
    fn test_double_dash_accepted() {
        let inv = parse("--input i.png --blur --output o.png").unwrap();
        assert_eq!(inv.steps[0], Step::Filter(Operation::Blur));
    }

    #[test]
    fn test_usage_errors() {
        for line in [
            "-blur -output o.png",
            "-input i.png -blur",
            "-input i.png -input j.png -output o.png",
            "-input i.png -frobnicate -output o.png",
            "-input i.png -brighten",
            "-input i.png -brighten lots -output o.png",
            "-input i.png -crop 1 2 3 -output o.png",
            "-input i.png -crop -1 0 3 3 -output o.png",
            "-input i.png stray -output o.png",
            "-input i.png -output o.unknownext",
        ] {
            let err = parse(line).unwrap_err();
            assert!(matches!(err, ProcessError::Usage(_)), "{line}: {err}");
        }
    }

    #[test]
    fn test_parameter_errors_surface_as_filter_errors() {
        for line in [
            "-input i.png -brighten 0 -output o.png",
            "-input i.png -channel purple -output o.png",
            "-input i.png -sample cubic -output o.png",
            "-input i.png -random-dither 0 -output o.png",
            "-input i.png -scale 0 1 -output o.png",
            "-input i.png -crop 0 0 0 5 -output o.png",
        ] {
            let err = parse(line).unwrap_err();
            assert!(matches!(err, ProcessError::Filter(_)), "{line}: {err}");
        }
    }
}
