//! `/spark` draw calculator.
//!
//! A spark is 300 draws. Draws come from crystals (300 per draw), single draw
//! tickets, and ten-part draw tickets.

pub const CRYSTALS_PER_DRAW: u64 = 300;
pub const DRAWS_PER_TEN_TICKET: u64 = 10;
pub const DRAWS_PER_SPARK: u64 = 300;

pub const USAGE: &str = "Usage: /spark <crystals> <tickets> <10-part tickets>";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SparkArgs {
    pub crystals: u64,
    pub tickets: u64,
    pub ten_tickets: u64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SparkProgress {
    pub draws: u64,
    pub sparks: u64,
    /// Draws missing until the next spark.
    pub remaining: u64,
    /// Progress toward the first spark; exceeds 100 once one is reached.
    pub percent: f64,
}

impl SparkProgress {
    pub fn compute(args: SparkArgs) -> Self {
        let draws = (args.crystals / CRYSTALS_PER_DRAW)
            .saturating_add(args.tickets)
            .saturating_add(args.ten_tickets.saturating_mul(DRAWS_PER_TEN_TICKET));
        Self {
            draws,
            sparks: draws / DRAWS_PER_SPARK,
            remaining: DRAWS_PER_SPARK - draws % DRAWS_PER_SPARK,
            percent: draws as f64 / DRAWS_PER_SPARK as f64 * 100.0,
        }
    }

    pub fn render(&self) -> String {
        let mut out = format!(
            "You have {} draw{} ({:.2}% of a spark).",
            self.draws,
            if self.draws == 1 { "" } else { "s" },
            self.percent
        );
        if self.sparks > 0 {
            out.push_str(&format!(
                "\nThat's {} spark{}!",
                self.sparks,
                if self.sparks == 1 { "" } else { "s" }
            ));
        }
        out.push_str(&format!(
            "\n{} more draw{} to the next spark.",
            self.remaining,
            if self.remaining == 1 { "" } else { "s" }
        ));
        out
    }
}

/// Parse exactly three non-negative integers.
pub fn parse_args(args: &str) -> Option<SparkArgs> {
    let nums = args
        .split_whitespace()
        .map(|s| s.replace(',', "").parse::<u64>().ok())
        .collect::<Option<Vec<_>>>()?;
    let [crystals, tickets, ten_tickets] = nums[..] else {
        return None;
    };
    Some(SparkArgs {
        crystals,
        tickets,
        ten_tickets,
    })
}

/// Reply text for `/spark <args>`.
pub fn reply(args: &str) -> String {
    match parse_args(args) {
        Some(a) => SparkProgress::compute(a).render(),
        None => USAGE.to_string(),
    }
}
