use std::io::{self, Write};

use serde_json::ser::{CompactFormatter, Formatter, PrettyFormatter};

use crate::error::EncodeError;

/// Push-style JSON output. Implementations take care of separators and layout; callers
/// only announce structure and values in document order.
pub trait JsonWriter {
    fn write_null(&mut self) -> Result<(), EncodeError>;
    fn write_bool(&mut self, v: bool) -> Result<(), EncodeError>;
    fn write_i64(&mut self, v: i64) -> Result<(), EncodeError>;
    fn write_u64(&mut self, v: u64) -> Result<(), EncodeError>;
    /// Pre-formatted JSON number text, written unquoted
    fn write_number_literal(&mut self, literal: &str) -> Result<(), EncodeError>;
    fn write_string(&mut self, v: &str) -> Result<(), EncodeError>;
    fn begin_array(&mut self) -> Result<(), EncodeError>;
    fn end_array(&mut self) -> Result<(), EncodeError>;
    fn begin_object(&mut self) -> Result<(), EncodeError>;
    fn write_name(&mut self, name: &str) -> Result<(), EncodeError>;
    fn end_object(&mut self) -> Result<(), EncodeError>;
}

const SPACES: &[u8] = b"                ";

enum Layout {
    Compact(CompactFormatter),
    Pretty(PrettyFormatter<'static>),
}

/// Forward a formatter call to whichever layout is active.
macro_rules! layout {
    ($w:ident . $method:ident ( $($arg:expr),* )) => {
        match &mut $w.layout {
            Layout::Compact(f) => f.$method(&mut $w.out $(, $arg)*),
            Layout::Pretty(f) => f.$method(&mut $w.out $(, $arg)*),
        }
    };
}

/// Where a value sits, which decides the formatter hook run after it.
#[derive(Clone, Copy)]
enum Slot {
    Root,
    Element,
    Member,
}

struct Frame {
    object: bool,
    first: bool,
    slot: Slot,
}

/// [`JsonWriter`] producing UTF-8 text on any `io::Write`, laid out by `serde_json`'s
/// compact or pretty formatter.
pub struct JsonTextWriter<W: Write> {
    out: W,
    layout: Layout,
    frames: Vec<Frame>,
    after_name: bool,
}

impl<W: Write> JsonTextWriter<W> {
    pub fn new(out: W) -> Self {
        Self::with_indent(out, None)
    }

    /// `Some(n)` pretty-prints with `n` spaces per level, at most 16.
    pub fn with_indent(out: W, indent: Option<usize>) -> Self {
        let layout = match indent {
            None => Layout::Compact(CompactFormatter),
            Some(n) => Layout::Pretty(PrettyFormatter::with_indent(&SPACES[..n.min(SPACES.len())])),
        };
        Self {
            out,
            layout,
            frames: Vec::new(),
            after_name: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn enter_value(&mut self) -> Result<Slot, EncodeError> {
        if self.after_name {
            self.after_name = false;
            return Ok(Slot::Member);
        }
        match self.frames.last_mut() {
            None => Ok(Slot::Root),
            Some(frame) if frame.object => {
                Err(EncodeError::Custom("object member written without a name".to_string()))
            }
            Some(frame) => {
                let first = std::mem::replace(&mut frame.first, false);
                layout!(self.begin_array_value(first))?;
                Ok(Slot::Element)
            }
        }
    }

    fn leave_value(&mut self, slot: Slot) -> Result<(), EncodeError> {
        match slot {
            Slot::Root => {}
            Slot::Element => layout!(self.end_array_value())?,
            Slot::Member => layout!(self.end_object_value())?,
        }
        Ok(())
    }

    fn scalar(&mut self, write: impl FnOnce(&mut Self) -> io::Result<()>) -> Result<(), EncodeError> {
        let slot = self.enter_value()?;
        write(self)?;
        self.leave_value(slot)
    }

    fn quoted(&mut self, s: &str) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, s).map_err(io::Error::from)
    }

    fn close(&mut self, object: bool) -> Result<Slot, EncodeError> {
        match self.frames.pop() {
            Some(frame) if frame.object == object && !self.after_name => Ok(frame.slot),
            _ => Err(EncodeError::Custom(
                "container closed without being opened".to_string(),
            )),
        }
    }
}

impl<W: Write> JsonWriter for JsonTextWriter<W> {
    fn write_null(&mut self) -> Result<(), EncodeError> {
        self.scalar(|w| layout!(w.write_null()))
    }

    fn write_bool(&mut self, v: bool) -> Result<(), EncodeError> {
        self.scalar(|w| layout!(w.write_bool(v)))
    }

    fn write_i64(&mut self, v: i64) -> Result<(), EncodeError> {
        self.scalar(|w| layout!(w.write_i64(v)))
    }

    fn write_u64(&mut self, v: u64) -> Result<(), EncodeError> {
        self.scalar(|w| layout!(w.write_u64(v)))
    }

    fn write_number_literal(&mut self, literal: &str) -> Result<(), EncodeError> {
        self.scalar(|w| layout!(w.write_number_str(literal)))
    }

    fn write_string(&mut self, v: &str) -> Result<(), EncodeError> {
        self.scalar(|w| w.quoted(v))
    }

    fn begin_array(&mut self) -> Result<(), EncodeError> {
        let slot = self.enter_value()?;
        layout!(self.begin_array())?;
        self.frames.push(Frame { object: false, first: true, slot });
        Ok(())
    }

    fn end_array(&mut self) -> Result<(), EncodeError> {
        let slot = self.close(false)?;
        layout!(self.end_array())?;
        self.leave_value(slot)
    }

    fn begin_object(&mut self) -> Result<(), EncodeError> {
        let slot = self.enter_value()?;
        layout!(self.begin_object())?;
        self.frames.push(Frame { object: true, first: true, slot });
        Ok(())
    }

    fn write_name(&mut self, name: &str) -> Result<(), EncodeError> {
        let first = match self.frames.last_mut() {
            Some(frame) if frame.object && !self.after_name => std::mem::replace(&mut frame.first, false),
            _ => return Err(EncodeError::Custom("name written outside an object".to_string())),
        };
        layout!(self.begin_object_key(first))?;
        self.quoted(name)?;
        layout!(self.end_object_key())?;
        layout!(self.begin_object_value())?;
        self.after_name = true;
        Ok(())
    }

    fn end_object(&mut self) -> Result<(), EncodeError> {
        let slot = self.close(true)?;
        layout!(self.end_object())?;
        self.leave_value(slot)
    }
}
