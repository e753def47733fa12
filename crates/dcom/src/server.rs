//! Server-side object table
//!
//! Maps IPIDs to the objects that serve them. Operation handlers resolve the
//! target object from the call's object UUID.

use crate::types::{hresult, Ipid};
use dcerpc::{CallContext, Result, RpcError};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Objects exported under their IPIDs
pub struct ObjectTable<T: ?Sized> {
    objects: RwLock<HashMap<Ipid, Arc<T>>>,
}

impl<T: ?Sized> ObjectTable<T> {
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
        }
    }

    /// Export `object` under a fresh IPID
    pub fn export(&self, object: Arc<T>) -> Ipid {
        let ipid = Ipid::generate();
        self.insert(ipid, object);
        ipid
    }

    /// Export `object` under a caller-chosen IPID, replacing any previous one
    pub fn insert(&self, ipid: Ipid, object: Arc<T>) {
        debug!("Exporting object as {}", ipid);
        self.objects.write().insert(ipid, object);
    }

    /// Stop serving `ipid`
    pub fn revoke(&self, ipid: &Ipid) -> Option<Arc<T>> {
        self.objects.write().remove(ipid)
    }

    pub fn get(&self, ipid: &Ipid) -> Option<Arc<T>> {
        self.objects.read().get(ipid).cloned()
    }

    pub fn len(&self) -> usize {
        self.objects.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.read().is_empty()
    }

    /// The object a call is addressed to
    ///
    /// A call without an object UUID fails with `MissingIpid`; an unknown
    /// IPID fails with `CO_E_OBJNOTCONNECTED`.
    pub fn resolve(&self, ctx: &CallContext, op: &'static str) -> Result<Arc<T>> {
        let ipid = ctx.object.map(Ipid::new).ok_or(RpcError::MissingIpid(op))?;
        self.get(&ipid).ok_or_else(|| {
            warn!("{}: no object exported as {}", op, ipid);
            RpcError::Fault(hresult::CO_E_OBJNOTCONNECTED)
        })
    }
}

impl<T: ?Sized> Default for ObjectTable<T> {
    fn default() -> Self {
        Self::new()
    }
}
