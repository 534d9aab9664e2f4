pub mod error;
pub mod export;
pub mod notifier;
pub mod repl;
pub mod session;

pub use error::{ExportError, ExportResult, SessionError, SessionResult};
pub use export::{deliver, render_pretty, ExportDocument, ExportSink, FileSink, WriterSink};
pub use notifier::{ConsoleNotifier, Notification, Notifier, Severity};
pub use repl::{Repl, ReplCommand};
pub use session::SchemaSession;
