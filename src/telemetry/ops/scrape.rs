use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::PhaseSpan;

#[derive(Copy, Clone, Debug)]
pub enum Phase { Scan, Parse, Merge, Write }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self {
        Phase::Scan => "scan",
        Phase::Parse => "parse",
        Phase::Merge => "merge",
        Phase::Write => "write",
    }}
    fn span(&self) -> Span { match self {
        Phase::Scan => info_span!("scan"),
        Phase::Parse => info_span!("parse"),
        Phase::Merge => info_span!("merge"),
        Phase::Write => info_span!("write"),
    }}
}

op_marker!(Countries, "countries", Phase);
op_marker!(Games, "games", Phase);
op_marker!(Best, "best", Phase);
op_marker!(Providers, "providers", Phase);
op_marker!(Details, "details", Phase);
