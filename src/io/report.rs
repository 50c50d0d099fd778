//! Progress report lines
//!
//! Everything the user reads on stdout goes through the [`Reporter`]. The
//! line texts are produced by plain functions so they can be checked without
//! a writer. No balancing decision is made here.

use crate::core::currency::CurrencyCodec;
use crate::types::{Account, BalanceError, Cents, PlannedTransfer, Session};
use std::io::Write;

/// Describe one plan entry
pub fn plan_line(entry: &PlannedTransfer, codec: &CurrencyCodec) -> String {
    if entry.needs_fillup() {
        format!(
            "Account {} needs fillup of {}, current amount: {}",
            entry.account.name(),
            codec.format(entry.amount_in_cents),
            codec.format(entry.account.credit_in_cents())
        )
    } else {
        format!(
            "Account {} does not need fillup, current amount: {}",
            entry.account.name(),
            codec.format(entry.account.credit_in_cents())
        )
    }
}

/// Describe a validated session
pub fn session_lines(session: &Session, codec: &CurrencyCodec) -> Vec<String> {
    let source = session.source_account();
    let mut lines = vec![format!(
        "Detected source account {} with a balance of {}",
        source.name(),
        codec.format(source.credit_in_cents())
    )];
    if let Some(selected) = session.selected_account() {
        lines.push(format!("Detected selected account {}", selected.name()));
    }
    lines.push(format!(
        "Detected {} possible target accounts.",
        session.fillable_accounts().len()
    ));
    lines
}

/// Writes report lines for one run
pub struct Reporter<'a> {
    out: &'a mut dyn Write,
    codec: &'a CurrencyCodec,
}

impl<'a> Reporter<'a> {
    pub fn new(out: &'a mut dyn Write, codec: &'a CurrencyCodec) -> Self {
        Reporter { out, codec }
    }

    fn line(&mut self, text: &str) -> Result<(), BalanceError> {
        writeln!(self.out, "{}", text)?;
        Ok(())
    }

    pub fn session_detected(&mut self, session: &Session) -> Result<(), BalanceError> {
        for line in session_lines(session, self.codec) {
            self.line(&line)?;
        }
        Ok(())
    }

    pub fn switching_source(&mut self) -> Result<(), BalanceError> {
        self.line("Switching to source account...")
    }

    pub fn planned(&mut self, entry: &PlannedTransfer) -> Result<(), BalanceError> {
        let line = plan_line(entry, self.codec);
        self.line(&line)
    }

    pub fn transferred(&mut self, entry: &PlannedTransfer) -> Result<(), BalanceError> {
        let line = format!(
            "Transferred {} to account {}",
            self.codec.format(entry.amount_in_cents),
            entry.account.name()
        );
        self.line(&line)
    }

    /// Note that the source account cannot cover the whole plan
    pub fn insufficient_source(
        &mut self,
        source: &Account,
        total_required: Cents,
    ) -> Result<(), BalanceError> {
        let line = format!(
            "Warning: source account {} holds {}, but {} are required",
            source.name(),
            self.codec.format(source.credit_in_cents()),
            self.codec.format(total_required)
        );
        self.line(&line)
    }

    pub fn totals(&mut self, total_required: Cents, dry_run: bool) -> Result<(), BalanceError> {
        let line = format!(
            "Total fillup required: {}",
            self.codec.format(total_required)
        );
        self.line(&line)?;
        if dry_run {
            self.line("Dry run: no money was transferred. Pass --execute to fill up accounts.")?;
        }
        Ok(())
    }
}
