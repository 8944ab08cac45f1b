use crate::envelope::Envelope;
use crate::error::Result;
use std::io::{self, Write};
use tracing::{debug, instrument};

pub const CONTENT_TYPE: &str = "application/json";

/// The outbound side of a response: a content type followed by a body.
pub trait ResponseSink {
    fn set_content_type(&mut self, mime: &str);

    fn write(&mut self, body: &str) -> io::Result<()>;
}

/// A [`ResponseSink`] over any writer.
///
/// With headers enabled the content type is written as a `Content-Type:` line
/// and a blank line ahead of the body, CGI style.
pub struct WriterSink<W: Write> {
    writer: W,
    content_type: Option<String>,
    headers: bool,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            content_type: None,
            headers: false,
        }
    }

    pub fn with_headers(mut self, headers: bool) -> Self {
        self.headers = headers;
        self
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ResponseSink for WriterSink<W> {
    fn set_content_type(&mut self, mime: &str) {
        self.content_type = Some(mime.to_string());
    }

    fn write(&mut self, body: &str) -> io::Result<()> {
        if self.headers {
            if let Some(mime) = &self.content_type {
                write!(self.writer, "Content-Type: {}\r\n\r\n", mime)?;
            }
        }
        self.writer.write_all(body.as_bytes())?;
        self.writer.flush()
    }
}

/// Text form of the body written by [`Envelope::send_as`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Encoding {
    #[default]
    Compact,
    Pretty,
}

impl Envelope {
    pub fn send<S: ResponseSink + ?Sized>(&self, sink: &mut S) -> Result<()> {
        self.send_as(sink, Encoding::Compact)
    }

    #[instrument(skip(self, sink), fields(status = %self.status()))]
    pub fn send_as<S: ResponseSink + ?Sized>(&self, sink: &mut S, encoding: Encoding) -> Result<()> {
        let body = match encoding {
            Encoding::Compact => self.encode(),
            Encoding::Pretty => self.encode_pretty(),
        };
        debug!(bytes = body.len(), ?encoding, "sending JSend response");
        sink.set_content_type(CONTENT_TYPE);
        sink.write(&body)?;
        Ok(())
    }
}
