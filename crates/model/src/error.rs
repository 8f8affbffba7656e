/// The kind of error that occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The provider answered with a failure status.
    Provider,
    /// The request never produced a usable answer (connection failures,
    /// timeouts, undecodable bodies, etc.).
    Transport,
}
