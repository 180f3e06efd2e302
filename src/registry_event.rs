/// Events emitted by the synchronized registry surface.
///
/// These events are passed to the callback set via
/// [`RegistryApi::set_trace_callback`](crate::RegistryApi::set_trace_callback)
/// and mirrored to `tracing` at `TRACE` level.
///
/// # Examples
///
/// ```rust
/// use dep_registry::RegistryEvent;
///
/// let event = RegistryEvent::Get { type_name: "&app::Client", found: false };
/// assert_eq!(event.to_string(), "get { type_name: &app::Client, found: false }");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent {
    /// A registration was attempted.
    Register {
        /// Key name of the type, e.g. `&app::Client`
        type_name: &'static str,
        /// Whether the value was stored
        registered: bool,
    },

    /// A value was requested.
    Get {
        type_name: &'static str,
        found: bool,
    },

    /// An existence check was performed.
    Has {
        type_name: &'static str,
        found: bool,
    },

    /// A removal was requested.
    Delete {
        type_name: &'static str,
        /// Whether an entry existed and was removed
        removed: bool,
    },

    /// The registry was cleared.
    Clear,
}

impl std::fmt::Display for RegistryEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryEvent::Register {
                type_name,
                registered,
            } => write!(
                f,
                "register {{ type_name: {type_name}, registered: {registered} }}"
            ),
            RegistryEvent::Get { type_name, found } => {
                write!(f, "get {{ type_name: {type_name}, found: {found} }}")
            }
            RegistryEvent::Has { type_name, found } => {
                write!(f, "has {{ type_name: {type_name}, found: {found} }}")
            }
            RegistryEvent::Delete { type_name, removed } => {
                write!(f, "delete {{ type_name: {type_name}, removed: {removed} }}")
            }
            RegistryEvent::Clear => write!(f, "Clearing the Registry"),
        }
    }
}
