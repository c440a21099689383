//! Builders for protocol-shaped log lines.
//!
//! Lines come out exactly as the workers print them, so tests exercise the
//! same patterns production logs hit. Timestamps are printed with three
//! decimals; the head patterns require a fractional part.

/// A generator thread line.
pub fn generator(at: f64, instance: u32, message: &str) -> String {
    format!(
        "{:.3} <c-1#9:0> DynamicCubeGeneratorThread {}: {}",
        at, instance, message
    )
}

/// A solver thread line.
pub fn solver(at: f64, instance: u32, message: &str) -> String {
    format!(
        "{:.3} <c-1#9:0> DynamicCubeSolverThread {}: {}",
        at, instance, message
    )
}

/// The library-joined line that force-closes running loops.
pub fn library_joined(at: f64) -> String {
    format!("{:.3} <c-1#9:0> Joined dynamic cube lib", at)
}

/// The terminal logger-destruction marker.
pub fn logger_destructed(at: f64) -> String {
    format!("{:.3} <c-1#9:0> Destructing logger", at)
}

/// A client-side line as the client node prints it.
pub fn client(at: f64, rank: u32, message: &str) -> String {
    format!("{:.3} {} {}", at, rank, message)
}
