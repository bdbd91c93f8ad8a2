use std::io::Write;

/// The evaluator's I/O boundary: supplies the stream `print` writes to.
pub trait Context {
    fn output(&mut self) -> &mut dyn Write;
}

/// Collects program output in memory; tests read it back afterwards.
#[derive(Debug, Default)]
pub struct BufferContext {
    buffer: Vec<u8>,
}

impl BufferContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer).into_owned()
    }
}

impl Context for BufferContext {
    fn output(&mut self) -> &mut dyn Write {
        &mut self.buffer
    }
}

/// Passes program output through to a caller-provided stream.
#[derive(Debug)]
pub struct StreamContext<W: Write> {
    stream: W,
}

impl<W: Write> StreamContext<W> {
    pub fn new(stream: W) -> Self {
        Self { stream }
    }

    pub fn into_inner(self) -> W {
        self.stream
    }
}

impl<W: Write> Context for StreamContext<W> {
    fn output(&mut self) -> &mut dyn Write {
        &mut self.stream
    }
}
