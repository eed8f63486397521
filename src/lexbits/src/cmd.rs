pub mod dump;
pub mod pack;
pub mod peek;

/// Represents a command in the lexbits application.
pub trait Command {
    /// Consumes a command object and executes the handler actions
    /// associated with it.
    ///
    /// On failure, an error will be reported.
    fn handle(self) -> eyre::Result<()>;
}
