//! Actions for identifiers, operators, numbers, text literals and
//! parenthesized groups.

use crate::ast::{self, Ast, QuoteSize};
use crate::parser::state::{ParenContext, TextState};
use crate::parser::Parser;
use crate::{Error, Result};

impl<'src> Parser<'src> {
  // --- identifiers ---

  pub(crate) fn on_variable(&mut self) -> Result<()> {
    let name = self.scanner.current_match();
    self.state.ident = Some(ast::var(name));
    self.begin_group(self.groups.ident_suffix);
    Ok(())
  }

  pub(crate) fn on_constructor(&mut self) -> Result<()> {
    let name = self.scanner.current_match();
    self.state.ident = Some(ast::cons(name));
    self.begin_group(self.groups.ident_suffix);
    Ok(())
  }

  pub(crate) fn on_wildcard(&mut self) -> Result<()> {
    self.state.ident = Some(Ast::Wildcard);
    self.begin_group(self.groups.ident_suffix);
    Ok(())
  }

  /// Append the pending identifier to the current expression.
  pub(crate) fn submit_ident(&mut self) -> Result<()> {
    let ident = self
      .state
      .ident
      .take()
      .ok_or_else(|| self.internal("no pending identifier"))?;
    self.state.app(ident);
    Ok(())
  }

  /// Non-breaker characters follow the pending identifier: glue them on
  /// as one invalid token.
  pub(crate) fn on_ident_suffix(&mut self) -> Result<()> {
    let body = self
      .state
      .ident
      .take()
      .ok_or_else(|| self.internal("no pending identifier"))?;
    self.error("invalid identifier suffix");
    let suffix = self.scanner.current_match();
    self.state.app(ast::invalid_suffix(body, suffix));
    self.end_group()
  }

  pub(crate) fn on_no_suffix(&mut self) -> Result<()> {
    self.submit_ident()?;
    self.end_group()
  }

  // --- operators ---

  pub(crate) fn on_operator(&mut self) -> Result<()> {
    let name = self.scanner.current_match();
    self.state.ident = Some(ast::operator(name));
    self.begin_group(self.groups.operator_modifier);
    Ok(())
  }

  pub(crate) fn on_no_mod_operator(&mut self) -> Result<()> {
    let name = self.scanner.current_match();
    self.state.ident = Some(ast::operator(name));
    self.begin_group(self.groups.operator_suffix);
    Ok(())
  }

  /// `=` directly after an operator turns it into a modifier.
  pub(crate) fn on_modifier(&mut self) -> Result<()> {
    let span = self.span();
    let name = match self.state.ident.take() {
      Some(Ast::Operator(name)) => name,
      _ => return Err(Error::internal("modifier check without operator", span)),
    };
    self.state.ident = Some(Ast::Modifier(name));
    self.submit_ident()?;
    self.end_group()
  }

  // --- numbers ---

  pub(crate) fn on_number(&mut self) -> Result<()> {
    self.state.number_part2 = self.scanner.current_match();
    self.begin_group(self.groups.number_phase2);
    Ok(())
  }

  /// `_` plus digits: what was scanned so far becomes the base.
  pub(crate) fn on_based_number(&mut self) -> Result<()> {
    self.state.number_part1 = std::mem::take(&mut self.state.number_part2);
    self.state.number_part2 = &self.scanner.current_match()[1..];

    let base = std::mem::take(&mut self.state.number_part1);
    let digits = std::mem::take(&mut self.state.number_part2);
    self.state.app(ast::number(Some(base), digits));
    self.end_group()
  }

  /// `_` with nothing after it.
  pub(crate) fn on_dangling_base(&mut self) -> Result<()> {
    self.error("numeric literal lacks base digits");
    let digits = std::mem::take(&mut self.state.number_part2);
    self.state.app(ast::dangling_base(digits));
    self.end_group()
  }

  pub(crate) fn on_plain_number(&mut self) -> Result<()> {
    let digits = std::mem::take(&mut self.state.number_part2);
    self.state.app(ast::number(None::<&str>, digits));
    self.end_group()
  }

  // --- text ---

  fn matched_quote(&self) -> QuoteSize {
    if self.scanner.match_len() == QuoteSize::Triple.width() {
      QuoteSize::Triple
    } else {
      QuoteSize::Single
    }
  }

  pub(crate) fn on_text_begin(&mut self) -> Result<()> {
    let quote = self.matched_quote();
    self.state.texts.push(TextState::new(quote));
    self.begin_group(self.groups.text);
    Ok(())
  }

  /// A quote inside a text literal either closes it or, at the wrong
  /// size, is plain content.
  pub(crate) fn on_text_quote(&mut self) -> Result<()> {
    let span = self.span();
    let quote = self.matched_quote();
    let top = self
      .state
      .texts
      .last_mut()
      .ok_or_else(|| Error::internal("no text literal in progress", span))?;
    if top.quote == quote {
      self.submit_text(true)
    } else {
      top.plain(self.scanner.current_match());
      Ok(())
    }
  }

  pub(crate) fn on_text_plain(&mut self) -> Result<()> {
    let span = self.span();
    let text = self.scanner.current_match();
    let top = self
      .state
      .texts
      .last_mut()
      .ok_or_else(|| Error::internal("no text literal in progress", span))?;
    top.plain(text);
    Ok(())
  }

  /// `\u` escape; the matched text minus the leading `\u` is kept as is.
  pub(crate) fn on_text_escape(&mut self) -> Result<()> {
    let span = self.span();
    let hex = &self.scanner.current_match()[2..];
    let top = self
      .state
      .texts
      .last_mut()
      .ok_or_else(|| Error::internal("no text literal in progress", span))?;
    top.escape(ast::escape_u16(hex));
    Ok(())
  }

  pub(crate) fn on_text_eof(&mut self) -> Result<()> {
    self.error("unterminated text literal");
    self.submit_text(false)?;
    self.scanner.rewind();
    Ok(())
  }

  fn submit_text(&mut self, closed: bool) -> Result<()> {
    let text = self
      .state
      .texts
      .pop()
      .ok_or_else(|| self.internal("no text literal in progress"))?;
    let node = if closed {
      ast::text(text.quote, text.segments)
    } else {
      ast::unterminated_text(text.quote, text.segments)
    };
    self.state.app(node);
    self.end_group()
  }

  // --- parenthesized groups ---

  pub(crate) fn on_group_begin(&mut self) -> Result<()> {
    let left_off = self.scanner.match_len() - 1;
    self.state.parens.push(ParenContext {
      left_off,
      block_depth: self.state.block_stack.len(),
    });
    self.state.push_ast();
    self.state.push_last_offset();
    self.begin_group(self.groups.parensed);
    Ok(())
  }

  pub(crate) fn on_group_end(&mut self) -> Result<()> {
    let context = self
      .state
      .parens
      .pop()
      .ok_or_else(|| self.internal("no open group"))?;
    while self.state.block_stack.len() > context.block_depth {
      self.submit_block()?;
    }

    let right_off = self.state.use_last_offset();
    let inner = self.state.result.take();
    self.pop_ast()?;
    self.pop_last_offset()?;
    self.state.app(ast::group(context.left_off, inner, right_off));
    self.end_group()
  }

  /// Input ended inside the group. Emit what was collected as an unclosed
  /// group and let the enclosing context observe the end of input.
  pub(crate) fn on_group_eof(&mut self) -> Result<()> {
    self.error("unclosed group");
    let context = self
      .state
      .parens
      .pop()
      .ok_or_else(|| self.internal("no open group"))?;
    while self.state.block_stack.len() > context.block_depth {
      self.submit_block()?;
    }

    let pending_ws = self.state.use_last_offset();
    let inner = self.state.result.take();
    self.pop_ast()?;
    self.pop_last_offset()?;
    match inner {
      Some(inner) => {
        self
          .state
          .app(ast::unclosed_group(Some(context.left_off), Some(inner)));
      }
      None => {
        self.state.app(ast::unclosed_group(None, None));
        self.state.last_offset += context.left_off;
      }
    }
    self.state.last_offset += pending_ws;

    self.end_group()?;
    self.scanner.rewind();
    Ok(())
  }

  pub(crate) fn on_unmatched_close(&mut self) -> Result<()> {
    self.error("unmatched closing parenthesis");
    self.state.app(Ast::UnmatchedClose);
    Ok(())
  }
}
