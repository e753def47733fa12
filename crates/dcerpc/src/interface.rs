//! Interface dispatch tables
//!
//! An [`Interface`] owns the operations it declares and, for derived
//! interfaces, a reference to its base. Opnums are flattened across the
//! inheritance chain: the base's operations occupy `0..base.op_count()` and
//! the interface's own operations follow.
//!
//! ```text
//! IUnknown             0..3
//! IDispatch            3..7
//! IFsrmObject          7..12
//! IFsrmRule           12..24
//! ```
//!
//! Dispatch yields one of three results: a handler, an operation known to
//! the table but without a handler (reported as "not implemented"), or
//! nothing (the opnum is outside the table and the call is unhandled).

use crate::dcerpc::SyntaxId;
use crate::error::Result;
use crate::operation::{decode_message, encode_message, Operation};
use bytes::Bytes;
use futures::future::BoxFuture;
use midl_ndr::NdrContext;
use std::future::Future;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

/// Per-call information handed to operation handlers
#[derive(Debug, Clone)]
pub struct CallContext {
    /// Call identifier, unique per connection
    pub call_id: u32,
    /// Flattened operation number
    pub opnum: u16,
    /// Object UUID of the request (the IPID for DCOM calls)
    pub object: Option<Uuid>,
    /// Association the call arrived on
    pub association: u32,
    /// Byte order and limits for the stub data
    pub ndr: NdrContext,
}

/// Operation handler function type
pub type OperationHandler =
    Arc<dyn Fn(CallContext, Bytes) -> BoxFuture<'static, Result<Bytes>> + Send + Sync>;

struct OperationEntry {
    name: &'static str,
    handler: Option<OperationHandler>,
}

/// Outcome of looking up an opnum
pub enum Dispatch<'a> {
    /// The operation has a handler
    Handler {
        name: &'static str,
        handler: &'a OperationHandler,
    },
    /// The operation is part of the interface but has no handler
    NotImplemented(&'static str),
}

/// Interface definition: own operations plus an optional base
pub struct Interface {
    syntax: SyntaxId,
    name: &'static str,
    base: Option<Arc<Interface>>,
    operations: Vec<Option<OperationEntry>>,
}

impl Interface {
    pub fn syntax(&self) -> SyntaxId {
        self.syntax
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn base(&self) -> Option<&Arc<Interface>> {
        self.base.as_ref()
    }

    /// First opnum owned by this interface rather than its base
    pub fn first_opnum(&self) -> u16 {
        self.base.as_ref().map_or(0, |base| base.op_count())
    }

    /// Total number of operations including every base
    pub fn op_count(&self) -> u16 {
        self.first_opnum() + self.operations.len() as u16
    }

    /// Resolve an opnum through the inheritance chain
    pub fn dispatch(&self, opnum: u16) -> Option<Dispatch<'_>> {
        if let Some(base) = &self.base {
            if opnum < base.op_count() {
                return base.dispatch(opnum);
            }
        }

        let index = opnum.checked_sub(self.first_opnum())? as usize;
        let entry = self.operations.get(index)?.as_ref()?;
        Some(match &entry.handler {
            Some(handler) => Dispatch::Handler {
                name: entry.name,
                handler,
            },
            None => Dispatch::NotImplemented(entry.name),
        })
    }

    /// Name of the operation at `opnum`, if the table knows it
    pub fn operation_name(&self, opnum: u16) -> Option<&'static str> {
        self.dispatch(opnum).map(|dispatch| match dispatch {
            Dispatch::Handler { name, .. } | Dispatch::NotImplemented(name) => name,
        })
    }

    /// Whether `syntax` names this interface or one of its bases
    pub fn implements(&self, syntax: &SyntaxId) -> bool {
        self.syntax.uuid == syntax.uuid
            || self.base.as_ref().is_some_and(|base| base.implements(syntax))
    }
}

impl std::fmt::Debug for Interface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interface")
            .field("name", &self.name)
            .field("syntax", &self.syntax)
            .field("base", &self.base.as_ref().map(|base| base.name))
            .field("op_count", &self.op_count())
            .finish()
    }
}

/// Builder for creating interfaces with a fluent API
///
/// Opnums passed to the builder are flattened opnums. An opnum that belongs
/// to the base interface is ignored.
pub struct InterfaceBuilder {
    interface: Interface,
}

impl InterfaceBuilder {
    pub fn new(name: &'static str, syntax: SyntaxId) -> Self {
        Self {
            interface: Interface {
                syntax,
                name,
                base: None,
                operations: Vec::new(),
            },
        }
    }

    /// Start an interface that inherits every operation of `base`
    pub fn derived(name: &'static str, syntax: SyntaxId, base: Arc<Interface>) -> Self {
        let mut builder = Self::new(name, syntax);
        builder.interface.base = Some(base);
        builder
    }

    fn insert(&mut self, opnum: u16, name: &'static str, handler: Option<OperationHandler>) {
        let first = self.interface.first_opnum();
        let Some(index) = opnum.checked_sub(first) else {
            warn!(
                "{}: opnum {} ({}) belongs to the base interface, ignoring",
                self.interface.name, opnum, name
            );
            return;
        };
        let index = index as usize;
        if self.interface.operations.len() <= index {
            self.interface.operations.resize_with(index + 1, || None);
        }
        self.interface.operations[index] = Some(OperationEntry { name, handler });
    }

    /// Declare an operation that has no handler; calls to it fail with "not implemented"
    pub fn declare(mut self, opnum: u16, name: &'static str) -> Self {
        self.insert(opnum, name, None);
        self
    }

    /// Register a raw stub-data handler
    pub fn operation<F, Fut>(mut self, opnum: u16, name: &'static str, handler: F) -> Self
    where
        F: Fn(CallContext, Bytes) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Bytes>> + Send + 'static,
    {
        let handler: OperationHandler = Arc::new(move |ctx, stub| Box::pin(handler(ctx, stub)));
        self.insert(opnum, name, Some(handler));
        self
    }

    /// Register a typed handler; decoding and encoding happen around it
    pub fn typed<O, F, Fut>(self, handler: F) -> Self
    where
        O: Operation,
        F: Fn(CallContext, O::Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<O::Response>> + Send + 'static,
    {
        let handler = Arc::new(handler);
        self.operation(O::OPNUM, O::NAME, move |ctx: CallContext, stub: Bytes| {
            let handler = Arc::clone(&handler);
            async move {
                let ndr = ctx.ndr;
                let request: O::Request = decode_message(&stub, ndr)?;
                let response = handler(ctx, request).await?;
                encode_message(O::NAME, response, ndr)
            }
        })
    }

    pub fn build(self) -> Interface {
        self.interface
    }
}
