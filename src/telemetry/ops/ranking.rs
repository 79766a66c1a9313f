use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::PhaseSpan;

#[derive(Copy, Clone, Debug)]
pub enum Phase { Load, Build, Write }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self { Phase::Load => "load", Phase::Build => "build", Phase::Write => "write" } }
    fn span(&self) -> Span { match self { Phase::Load => info_span!("load"), Phase::Build => info_span!("build"), Phase::Write => info_span!("write") } }
}

op_marker!(Rank, "rank", Phase);
op_marker!(Pivot, "pivot", Phase);
op_marker!(Export, "export", Phase);
