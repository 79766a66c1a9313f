/// Declares a unit op marker with its root span and the phase enum it logs under.
macro_rules! op_marker {
    ($op:ident, $name:literal, $phase:ty) => {
        #[derive(Copy, Clone, Debug)]
        pub struct $op;

        impl $crate::telemetry::ctx::OpMarker for $op {
            const NAME: &'static str = $name;
            type Phase = $phase;
            fn root_span() -> ::tracing::Span { ::tracing::info_span!($name) }
        }
    };
}
