//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! Every frame goes through one encoder. With no usable previous frame
//! (first draw, resize, `invalidate`) the screen is cleared and each row is
//! written as a single run; otherwise only the runs of changed cells are.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// Frame currently on screen, if it can be diffed against.
    shown: Option<FrameBuffer>,
    out: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            shown: None,
            out: Vec::with_capacity(16 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.out.clear();
        self.out.queue(terminal::EnterAlternateScreen)?;
        self.out.queue(cursor::Hide)?;
        self.out.queue(terminal::DisableLineWrap)?;
        self.shown = None;
        self.flush_out()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.out.clear();
        self.out.queue(ResetColor)?;
        self.out.queue(SetAttribute(Attribute::Reset))?;
        self.out.queue(terminal::EnableLineWrap)?;
        self.out.queue(cursor::Show)?;
        self.out.queue(terminal::LeaveAlternateScreen)?;
        self.flush_out()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Next draw repaints the whole screen (terminal resize).
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Draw `fb`, then hand the previous frame back through it.
    ///
    /// Callers keep rendering into the same buffer each frame; no frame is
    /// cloned.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        let prev = self
            .shown
            .take()
            .filter(|s| s.width() == fb.width() && s.height() == fb.height());

        self.out.clear();
        if prev.is_none() {
            self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        }
        encode_frame(prev.as_ref(), fb, &mut self.out)?;
        self.flush_out()?;

        let mut prev = prev.unwrap_or_else(|| FrameBuffer::new(fb.width(), fb.height()));
        std::mem::swap(&mut prev, fb);
        self.shown = Some(prev);
        Ok(())
    }

    fn flush_out(&mut self) -> Result<()> {
        self.stdout.write_all(&self.out)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Queue the cells of `next` that differ from `prev`, or all of them.
///
/// `prev`, when given, must have the same dimensions as `next`.
fn encode_frame(prev: Option<&FrameBuffer>, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut pen = Pen { out, style: None };
    for y in 0..next.height() {
        match prev {
            Some(prev) => {
                for (x, len) in changed_runs(prev, next, y) {
                    pen.run(next, x, y, len)?;
                }
            }
            None => pen.run(next, 0, y, next.width())?,
        }
    }

    pen.out.queue(ResetColor)?;
    pen.out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Horizontal runs `(x, len)` of row `y` whose cells differ.
fn changed_runs<'a>(
    prev: &'a FrameBuffer,
    next: &'a FrameBuffer,
    y: u16,
) -> impl Iterator<Item = (u16, u16)> + 'a {
    let w = next.width();
    let differs = move |x: u16| prev.get(x, y) != next.get(x, y);
    let mut x = 0;
    std::iter::from_fn(move || {
        while x < w && !differs(x) {
            x += 1;
        }
        if x == w {
            return None;
        }
        let start = x;
        while x < w && differs(x) {
            x += 1;
        }
        Some((start, x - start))
    })
}

/// Writes cells, emitting style changes only when the style differs from
/// the last cell written.
struct Pen<'a> {
    out: &'a mut Vec<u8>,
    style: Option<CellStyle>,
}

impl Pen<'_> {
    fn run(&mut self, fb: &FrameBuffer, x: u16, y: u16, len: u16) -> Result<()> {
        self.out.queue(cursor::MoveTo(x, y))?;
        for dx in 0..len {
            self.cell(fb.get(x + dx, y).unwrap_or_default())?;
        }
        Ok(())
    }

    fn cell(&mut self, cell: Cell) -> Result<()> {
        if self.style != Some(cell.style) {
            let style = cell.style;
            self.out.queue(SetAttribute(Attribute::Reset))?;
            self.out.queue(SetForegroundColor(term_color(style.fg)))?;
            self.out.queue(SetBackgroundColor(term_color(style.bg)))?;
            if style.bold {
                self.out.queue(SetAttribute(Attribute::Bold))?;
            }
            if style.dim {
                self.out.queue(SetAttribute(Attribute::Dim))?;
            }
            self.style = Some(style);
        }
        self.out.queue(Print(cell.ch))?;
        Ok(())
    }
}

fn term_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
