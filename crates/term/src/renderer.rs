//! TerminalRenderer: the render port that draws the game window on a terminal.
//!
//! Render commands paint into a framebuffer; `flush` diffs it against what
//! was last written and sends only the changed runs. `ClearAndDrawFrame`
//! forces the next flush to repaint the whole screen, which is how a garbled
//! terminal is recovered.

use std::io::{self, Write};

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};
use log::trace;

use crate::core::RenderPort;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::game_view::GameView;
use crate::types::RenderCommand;

pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    view: GameView,
    front: FrameBuffer,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl TerminalRenderer<io::Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout(), GameView::new())
    }
}

impl Default for TerminalRenderer<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn with_writer(out: W, view: GameView) -> Self {
        let (w, h) = view.required_size();
        Self {
            out,
            view,
            front: FrameBuffer::new(w, h),
            last: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    /// Force the next flush to be a full redraw.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// The window as it will look after the next flush.
    pub fn frame(&self) -> &FrameBuffer {
        &self.front
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.out
    }
}

impl<W: Write> RenderPort for TerminalRenderer<W> {
    fn apply(&mut self, cmd: RenderCommand) -> io::Result<()> {
        if matches!(cmd, RenderCommand::ClearAndDrawFrame) {
            self.invalidate();
        }
        self.view.apply(&mut self.front, &cmd);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.buf.clear();
        let runs = match &self.last {
            Some(prev) => encode_diff_into(prev, &self.front, &mut self.buf)?,
            None => {
                encode_full_into(&self.front, &mut self.buf)?;
                self.front.height() as usize
            }
        };
        if runs == 0 {
            return Ok(());
        }
        trace!("flushing {} run(s), {} bytes", runs, self.buf.len());

        self.out.write_all(&self.buf)?;
        self.out.flush()?;

        // Keep the allocation of the previous frame.
        if let Some(prev) = self.last.as_mut() {
            prev.clone_from(&self.front);
        } else {
            self.last = Some(self.front.clone());
        }
        Ok(())
    }
}

/// Encode a full-frame redraw into `out`.
///
/// This builds a sequence of crossterm commands without writing to stdout.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(0, 0))?;

    let mut current_style: Option<CellStyle> = None;
    for y in 0..fb.height() {
        for x in 0..fb.width() {
            let cell = fb.get(x, y).unwrap_or_default();
            if current_style != Some(cell.style) {
                apply_style_into(out, cell.style)?;
                current_style = Some(cell.style);
            }
            out.queue(Print(cell.ch))?;
        }
        if y + 1 < fb.height() {
            out.queue(Print("\r\n"))?;
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Encode the changed runs between two frames into `out`.
///
/// Returns the number of runs; nothing is queued when it is zero.
pub fn encode_diff_into(
    prev: &FrameBuffer,
    next: &FrameBuffer,
    out: &mut Vec<u8>,
) -> io::Result<usize> {
    let mut current_style: Option<CellStyle> = None;
    let mut runs = 0;

    for_each_changed_run(prev, next, |x, y, len| {
        runs += 1;
        out.queue(cursor::MoveTo(x, y))?;
        for dx in 0..len {
            let cell = next.get(x + dx, y).unwrap_or_default();
            if current_style != Some(cell.style) {
                apply_style_into(out, cell.style)?;
                current_style = Some(cell.style);
            }
            out.queue(Print(cell.ch))?;
        }
        Ok(())
    })?;

    if runs > 0 {
        out.queue(ResetColor)?;
        out.queue(SetAttribute(Attribute::Reset))?;
    }
    Ok(runs)
}

fn apply_style_into(out: &mut Vec<u8>, style: CellStyle) -> io::Result<()> {
    out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
    out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
    out.queue(SetAttribute(Attribute::Reset))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.reverse {
        out.queue(SetAttribute(Attribute::Reverse))?;
    }
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

fn for_each_changed_run(
    prev: &FrameBuffer,
    next: &FrameBuffer,
    mut f: impl FnMut(u16, u16, u16) -> io::Result<()>,
) -> io::Result<()> {
    if prev.width() != next.width() || prev.height() != next.height() {
        // Size changed: treat everything as dirty in a single pass (row runs).
        for y in 0..next.height() {
            f(0, y, next.width())?;
        }
        return Ok(());
    }

    let w = next.width();
    let h = next.height();

    for y in 0..h {
        let mut x = 0;
        while x < w {
            if prev.get(x, y) == next.get(x, y) {
                x += 1;
                continue;
            }

            let start = x;
            x += 1;
            while x < w && prev.get(x, y) != next.get(x, y) {
                x += 1;
            }
            f(start, y, x - start)?;
        }
    }

    Ok(())
}
