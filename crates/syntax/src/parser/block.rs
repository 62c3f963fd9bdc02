//! The indentation-driven block aggregator.
//!
//! A newline saves the finished line's trailing whitespace and switches to
//! the NEWLINE group, which looks at what the next line brings: another
//! newline (an empty line), the end of input, or content at some
//! indentation. Equal indentation submits the previous line; deeper
//! indentation suspends it and opens a nested block that is later applied
//! to it; shallower indentation closes blocks until a matching level is
//! found, opening an explicitly invalid block when none matches.

use crate::ast::{self, Ast, Block};
use crate::parser::state::BlockState;
use crate::parser::Parser;
use crate::Result;

impl<'src> Parser<'src> {
  /// NORMAL `\n`: save the line's trailing whitespace, look at the next
  /// line.
  pub(crate) fn on_newline(&mut self) -> Result<()> {
    self.state.push_last_offset();
    self.begin_group(self.groups.newline);
    Ok(())
  }

  /// NEWLINE, `[ws] \n`: a whole line of nothing but whitespace.
  pub(crate) fn on_empty_line(&mut self) -> Result<()> {
    self.state.last_offset += self.scanner.match_len() - 1;
    let width = self.state.use_last_offset();
    self.state.pending_empty_lines.push(width);
    Ok(())
  }

  /// NEWLINE, `[ws] eof`: record the final empty line, restore the open
  /// line's trailing offset, and give the sentinel back so the enclosing
  /// group's own eof rule runs.
  pub(crate) fn on_eof_line(&mut self) -> Result<()> {
    self.end_group()?;
    self.state.last_offset += self.scanner.match_len() - 1;
    let width = self.state.use_last_offset();
    self.state.pending_empty_lines.push(width);
    self.pop_last_offset()?;
    self.scanner.unconsume(1);
    Ok(())
  }

  /// NEWLINE, `[ws]`: content follows at `last_offset` indentation.
  pub(crate) fn on_block_newline(&mut self) -> Result<()> {
    self.end_group()?;
    self.state.last_offset += self.scanner.match_len();

    let indent = self.state.last_offset;
    if indent == self.state.block.indent {
      self.state.use_last_offset();
      self.pop_last_offset()?;
      self.submit_line();
    } else if indent > self.state.block.indent {
      // The previous line stays suspended; the saved trailing offset
      // becomes the spacing of the block application on close.
      let indent = self.state.use_last_offset();
      self.open_block(indent, true);
    } else {
      let new_indent = self.state.use_last_offset();
      self.pop_last_offset()?;
      self.submit_line();
      self.on_block_end(new_indent)?;
    }
    self.state.line_open = true;
    Ok(())
  }

  /// Open a nested block at `indent`; empty lines seen since the last
  /// submitted line become its leading empty lines.
  pub(crate) fn open_block(&mut self, indent: usize, valid: bool) {
    self.state.push_ast();
    let empty_lines = std::mem::take(&mut self.state.pending_empty_lines);
    let parent = std::mem::replace(
      &mut self.state.block,
      BlockState::new(indent, valid, empty_lines),
    );
    self.state.block_stack.push(parent);
  }

  /// Close blocks until one at `new_indent` or shallower is current. An
  /// in-between level that matches no block opens an invalid one.
  pub(crate) fn on_block_end(&mut self, new_indent: usize) -> Result<()> {
    while new_indent < self.state.block.indent {
      self.submit_block()?;
    }
    if new_indent > self.state.block.indent {
      self.error("invalid indentation");
      self.state.push_last_offset();
      self.open_block(new_indent, false);
    } else if self.state.line_open {
      self.submit_line();
    }
    Ok(())
  }

  /// Attach the open line to the current block, followed by any pending
  /// empty lines. `last_offset` is the line's trailing whitespace.
  pub(crate) fn submit_line(&mut self) {
    if !self.state.line_open {
      return;
    }
    let off = self.state.use_last_offset();
    match self.state.result.take() {
      Some(body) => {
        if self.state.block.first_line.is_none() {
          self.state.block.first_line = Some(ast::required(body, off));
        } else {
          self.state.block.lines.push(ast::line(Some(body), off));
        }
      }
      None => self.record_empty_line(off),
    }
    let pending = std::mem::take(&mut self.state.pending_empty_lines);
    for width in pending {
      self.record_empty_line(width);
    }
    self.state.line_open = false;
  }

  fn record_empty_line(&mut self, width: usize) {
    if self.state.block.first_line.is_none() {
      self.state.block.empty_lines.push(width);
    } else {
      self.state.block.lines.push(ast::line(None, width));
    }
  }

  /// Finish the current block and apply it to the suspended line of its
  /// parent.
  pub(crate) fn submit_block(&mut self) -> Result<()> {
    self.submit_line();

    let parent = self
      .state
      .block_stack
      .pop()
      .ok_or_else(|| self.internal("block stack underflow"))?;
    let done = std::mem::replace(&mut self.state.block, parent);
    self.pop_ast()?;
    self.pop_last_offset()?;

    match done.first_line {
      Some(first_line) => {
        let block = Block {
          indent: done.indent,
          empty_lines: done.empty_lines,
          first_line,
          lines: done.lines,
        };
        let node = if done.valid {
          Ast::Block(Box::new(block))
        } else {
          Ast::InvalidIndentation(Box::new(block))
        };
        self.state.app(node);
      }
      None => {
        // No content line ever arrived (only possible when a group closes
        // an abandoned block): dissolve it into empty lines.
        for width in done.empty_lines {
          self.state.pending_empty_lines.push(width);
        }
        for line in done.lines {
          self.state.pending_empty_lines.push(line.off);
        }
      }
    }
    self.state.line_open = true;
    Ok(())
  }

  /// Assemble the module from the root block and whatever empty lines are
  /// still pending.
  pub(crate) fn submit_module(&mut self) -> Result<()> {
    self.submit_line();
    let pending = std::mem::take(&mut self.state.pending_empty_lines);
    for width in pending {
      self.record_empty_line(width);
    }

    let root = std::mem::replace(&mut self.state.block, BlockState::new(0, true, vec![]));
    let mut lines = vec![];
    for width in root.empty_lines {
      lines.push(ast::line(None, width));
    }
    if let Some(first) = root.first_line {
      lines.push(ast::line(Some(first.body), first.off));
    }
    lines.extend(root.lines);
    if lines.is_empty() {
      let off = self.state.use_last_offset();
      lines.push(ast::line(None, off));
    }

    let first_line = lines.remove(0);
    self.state.module = Some(ast::Module { first_line, lines });
    Ok(())
  }

  /// NORMAL `eof`: finish the pending identifier if any, close every open
  /// block, and emit the module.
  pub(crate) fn on_eof(&mut self) -> Result<()> {
    if self.state.ident.is_some() {
      self.submit_ident()?;
    }
    self.on_block_end(0)?;
    self.submit_module()?;
    self.done = true;
    Ok(())
  }
}
