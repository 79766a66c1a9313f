use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::PhaseSpan;

#[derive(Copy, Clone, Debug)]
pub enum Phase { Load, Diff, Write }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self { Phase::Load => "load", Phase::Diff => "diff", Phase::Write => "write" } }
    fn span(&self) -> Span { match self { Phase::Load => info_span!("load"), Phase::Diff => info_span!("diff"), Phase::Write => info_span!("write") } }
}

op_marker!(Urls, "urls", Phase);
op_marker!(Missing, "missing", Phase);
