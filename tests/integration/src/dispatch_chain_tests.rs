//! Dispatch Chain Tests - four-level inheritance over one binding
//!
//! IUnknown -> IDispatch -> IFsrmObject -> IFsrmRule -> IFsrmClassificationRule
//!
//! These tests exercise:
//! - Calls to operations inherited two and three levels up
//! - Operations declared without a handler
//! - Opnums beyond the whole chain
//! - Handler status codes returned as HRESULTs

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use futures::future::join_all;
use parking_lot::Mutex;

use common::*;
use dcerpc::{Call, CallContext, FaultStatus, Result, RpcError, StatusCode};
use dcom::{hresult, Ipid, ObjectTable};
use midl_ndr::Uuid;
use msrpc::fsrm::classification_rule::{ClassificationRuleClient, ClassificationRuleHandler, ClassificationRuleServer};
use msrpc::fsrm::object::FsrmObjectHandler;
use msrpc::fsrm::rule::{opnum as rule_opnum, FsrmRuleClient, FsrmRuleHandler};
use msrpc::fsrm::{ExecutionOption, RuleType};

/// A classification rule kept in memory
struct MemoryRule {
    id: Uuid,
    state: Mutex<RuleState>,
}

#[derive(Default)]
struct RuleState {
    description: String,
    name: String,
    module: String,
    flags: i32,
    option: ExecutionOption,
    property: String,
    value: String,
}

impl MemoryRule {
    fn new(name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            state: Mutex::new(RuleState {
                name: name.to_string(),
                module: "Folder Classifier".to_string(),
                option: ExecutionOption::EvaluateUnset,
                ..RuleState::default()
            }),
        }
    }
}

#[async_trait]
impl FsrmObjectHandler for MemoryRule {
    async fn id(&self, _ctx: &CallContext) -> Result<Uuid> {
        Ok(self.id)
    }

    async fn description(&self, _ctx: &CallContext) -> Result<String> {
        Ok(self.state.lock().description.clone())
    }

    async fn set_description(&self, _ctx: &CallContext, description: String) -> Result<()> {
        self.state.lock().description = description;
        Ok(())
    }
}

#[async_trait]
impl FsrmRuleHandler for MemoryRule {
    async fn name(&self, _ctx: &CallContext) -> Result<String> {
        Ok(self.state.lock().name.clone())
    }

    async fn set_name(&self, _ctx: &CallContext, name: String) -> Result<()> {
        self.state.lock().name = name;
        Ok(())
    }

    async fn rule_type(&self, _ctx: &CallContext) -> Result<RuleType> {
        Ok(RuleType::Classification)
    }

    async fn module_definition_name(&self, _ctx: &CallContext) -> Result<String> {
        Ok(self.state.lock().module.clone())
    }

    async fn rule_flags(&self, _ctx: &CallContext) -> Result<i32> {
        Ok(self.state.lock().flags)
    }

    async fn set_rule_flags(&self, _ctx: &CallContext, flags: i32) -> Result<()> {
        if flags < 0 {
            return Err(RpcError::Status {
                op: "SetRuleFlags",
                status: StatusCode::E_INVALIDARG,
            });
        }
        self.state.lock().flags = flags;
        Ok(())
    }

    async fn last_modified(&self, _ctx: &CallContext) -> Result<f64> {
        Ok(45_000.5)
    }
}

#[async_trait]
impl ClassificationRuleHandler for MemoryRule {
    async fn execution_option(&self, _ctx: &CallContext) -> Result<ExecutionOption> {
        Ok(self.state.lock().option)
    }

    async fn set_execution_option(&self, _ctx: &CallContext, option: ExecutionOption) -> Result<()> {
        self.state.lock().option = option;
        Ok(())
    }

    async fn property_affected(&self, _ctx: &CallContext) -> Result<String> {
        Ok(self.state.lock().property.clone())
    }

    async fn set_property_affected(&self, _ctx: &CallContext, property: String) -> Result<()> {
        self.state.lock().property = property;
        Ok(())
    }

    async fn value(&self, _ctx: &CallContext) -> Result<String> {
        Ok(self.state.lock().value.clone())
    }

    async fn set_value(&self, _ctx: &CallContext, value: String) -> Result<()> {
        self.state.lock().value = value;
        Ok(())
    }
}

struct Fixture {
    transport: dcerpc::LocalTransport,
    objects: Arc<ObjectTable<dyn ClassificationRuleHandler>>,
}

async fn fixture() -> Fixture {
    init_logging();
    let (server, transport) = local_server();
    let objects: Arc<ObjectTable<dyn ClassificationRuleHandler>> = Arc::new(ObjectTable::new());
    ClassificationRuleServer::new(Arc::clone(&objects))
        .register(&server)
        .await;
    Fixture { transport, objects }
}

impl Fixture {
    fn export(&self, name: &str) -> (Ipid, Arc<MemoryRule>) {
        let rule = Arc::new(MemoryRule::new(name));
        let ipid = self.objects.export(Arc::clone(&rule) as Arc<dyn ClassificationRuleHandler>);
        (ipid, rule)
    }

    async fn client(&self, ipid: Ipid) -> ClassificationRuleClient {
        ClassificationRuleClient::bind(&self.transport)
            .await
            .unwrap()
            .with_ipid(ipid)
    }
}

#[tokio::test]
async fn test_each_level_reaches_the_object() {
    let fx = fixture().await;
    let (ipid, rule) = fx.export("Confidential");
    let client = fx.client(ipid).await;

    // IFsrmObject, two levels above the bound interface
    assert_eq!(client.object().id().await.unwrap(), rule.id);
    client.object().set_description("Marks HR folders").await.unwrap();
    assert_eq!(client.object().description().await.unwrap(), "Marks HR folders");

    // IFsrmRule
    assert_eq!(client.rule().name().await.unwrap(), "Confidential");
    assert_eq!(client.rule().rule_type().await.unwrap(), RuleType::Classification);
    assert_eq!(client.rule().module_definition_name().await.unwrap(), "Folder Classifier");
    assert_eq!(client.rule().last_modified().await.unwrap(), 45_000.5);

    // IFsrmClassificationRule
    client
        .set_execution_option(ExecutionOption::ReEvaluateIgnoreExistingValue)
        .await
        .unwrap();
    client.set_property_affected("Confidentiality").await.unwrap();
    client.set_value("High").await.unwrap();
    assert_eq!(
        client.execution_option().await.unwrap(),
        ExecutionOption::ReEvaluateIgnoreExistingValue
    );
    assert_eq!(client.property_affected().await.unwrap(), "Confidentiality");
    assert_eq!(client.value().await.unwrap(), "High");

    assert_eq!(rule.state.lock().description, "Marks HR folders");
}

#[tokio::test]
async fn test_empty_string_property() {
    let fx = fixture().await;
    let (ipid, _rule) = fx.export("Empty");
    let client = fx.client(ipid).await;

    assert_eq!(client.value().await.unwrap(), "");
    client.rule().set_name("").await.unwrap();
    assert_eq!(client.rule().name().await.unwrap(), "");
}

#[tokio::test]
async fn test_handler_status_is_returned() {
    let fx = fixture().await;
    let (ipid, rule) = fx.export("Flags");
    let client = fx.client(ipid).await;

    client.rule().set_rule_flags(4).await.unwrap();
    let err = client.rule().set_rule_flags(-1).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::E_INVALIDARG), "{}", err);
    assert!(matches!(err, RpcError::Status { .. }));
    assert_eq!(rule.state.lock().flags, 4);
}

#[tokio::test]
async fn test_unimplemented_operations() {
    let fx = fixture().await;
    let (ipid, _rule) = fx.export("Partial");
    let client = fx.client(ipid).await;

    // handler keeps the trait default
    let err = client.object().commit().await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::E_NOTIMPL), "{}", err);

    // declared in the table, no handler at all
    let stub = client
        .conn()
        .invoke(Call {
            opnum: rule_opnum::SET_PARAMETERS,
            object: Some(ipid.uuid()),
            stub: Bytes::new(),
        })
        .await;
    assert_eq!(stub.unwrap_err().status(), Some(StatusCode::E_NOTIMPL));
}

#[tokio::test]
async fn test_opnum_beyond_chain_is_unhandled() {
    let fx = fixture().await;
    let (ipid, _rule) = fx.export("Range");
    let client = fx.client(ipid).await;

    let err = client
        .conn()
        .invoke(Call {
            opnum: 30,
            object: Some(ipid.uuid()),
            stub: Bytes::new(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::from(FaultStatus::OpRngError)), "{}", err);
}

#[tokio::test]
async fn test_base_interface_bound_directly() {
    let fx = fixture().await;
    let (ipid, _rule) = fx.export("Direct");

    let rule = FsrmRuleClient::bind(&fx.transport).await.unwrap().with_ipid(ipid);
    rule.set_name("Renamed").await.unwrap();

    let derived = fx.client(ipid).await;
    assert_eq!(derived.rule().name().await.unwrap(), "Renamed");
}

#[tokio::test]
async fn test_revoked_object_is_not_connected() {
    let fx = fixture().await;
    let (ipid, _rule) = fx.export("Revoked");
    let client = fx.client(ipid).await;

    assert!(client.value().await.is_ok());
    assert!(fx.objects.revoke(&ipid).is_some());
    let err = client.value().await.unwrap_err();
    assert_eq!(err.status(), Some(hresult::CO_E_OBJNOTCONNECTED), "{}", err);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_objects_stay_separate() {
    const OBJECTS: usize = 16;

    let fx = fixture().await;
    let base = ClassificationRuleClient::bind(&fx.transport).await.unwrap();
    let exported: Vec<(Ipid, Arc<MemoryRule>)> = (0..OBJECTS)
        .map(|i| fx.export(&format!("Rule {}", i)))
        .collect();

    let calls = exported.iter().enumerate().map(|(i, (ipid, _))| {
        let client = base.with_ipid(*ipid);
        async move {
            client.set_value(&format!("value {}", i)).await?;
            let name = client.rule().name().await?;
            let value = client.value().await?;
            Ok::<_, RpcError>((name, value))
        }
    });

    for (i, result) in join_all(calls).await.into_iter().enumerate() {
        let (name, value) = result.unwrap();
        assert_eq!(name, format!("Rule {}", i));
        assert_eq!(value, format!("value {}", i));
    }
    for (i, (_, rule)) in exported.iter().enumerate() {
        assert_eq!(rule.state.lock().value, format!("value {}", i));
    }
}
