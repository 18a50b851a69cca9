//! ResetUserHandler - returns a user's graph state and session flags to a
//! clean initial condition.
//!
//! Like every graph mutation, the reset passes the consent gate first
//! (`consentDataProcessing`). The graph reset (bootstrap flag + attachment
//! deletion) is one transaction; the ephemeral clear follows. No
//! transaction spans both stores: if the graph reset fails, the ephemeral
//! clear is not attempted and the call fails. A crash between the two
//! leaves the ephemeral key stale until its TTL expires.

use std::sync::Arc;

use crate::application::ConsentGate;
use crate::domain::consent::CONSENT_DATA_PROCESSING;
use crate::domain::foundation::{DomainError, ErrorCode, SessionId, UserId};
use crate::domain::safety::session_key;
use crate::ports::{EphemeralStore, GraphStateStore};

const AWAITING_BOOTSTRAP_FIELD: &str = "awaitingBootstrap";

/// Command to reset one user.
#[derive(Debug, Clone)]
pub struct ResetUserCommand {
    pub user_id: UserId,
    pub session_id: SessionId,
}

/// Handler orchestrating graph and ephemeral stores on reset.
pub struct ResetUserHandler {
    consent_gate: ConsentGate,
    graph: Arc<dyn GraphStateStore>,
    ephemeral: Arc<dyn EphemeralStore>,
}

impl ResetUserHandler {
    pub fn new(
        consent_gate: ConsentGate,
        graph: Arc<dyn GraphStateStore>,
        ephemeral: Arc<dyn EphemeralStore>,
    ) -> Self {
        Self {
            consent_gate,
            graph,
            ephemeral,
        }
    }

    /// Idempotent: repeating the call observes the same clean state.
    pub async fn handle(&self, cmd: ResetUserCommand) -> Result<(), DomainError> {
        if !self
            .consent_gate
            .has_permission(&cmd.user_id, CONSENT_DATA_PROCESSING)
            .await
        {
            return Err(DomainError::new(
                ErrorCode::ConsentDenied,
                "Data processing consent not granted",
            ));
        }

        // Graph reset first; the ephemeral clear only runs after it commits.
        self.graph.reset_user_graph(&cmd.user_id).await?;

        self.ephemeral
            .delete(&session_key(&cmd.session_id, AWAITING_BOOTSTRAP_FIELD))
            .await?;

        tracing::info!(user_id = %cmd.user_id, session_id = %cmd.session_id, "user reset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryConsentStore, InMemoryEphemeralStore, InMemoryGraphStore,
    };
    use crate::domain::attachment::{Attachment, AttachmentKind, PowerLevel, Valence};
    use crate::domain::consent::{ConsentProfile, Permission};
    use async_trait::async_trait;
    use crate::domain::attachment::UserNode;
    use crate::domain::information::InformationEvent;

    fn uid() -> UserId {
        UserId::try_new("u1").unwrap()
    }

    fn sid() -> SessionId {
        SessionId::try_new("s1").unwrap()
    }

    /// Gate backed by a profile for "u1"; onboarding grants data processing.
    fn consenting_gate() -> ConsentGate {
        let store = InMemoryConsentStore::new();
        store.put(uid(), ConsentProfile::onboarding_default());
        ConsentGate::new(Arc::new(store))
    }

    fn attachment(name: &str) -> Attachment {
        Attachment::new(
            name,
            AttachmentKind::Value,
            PowerLevel::try_new(5.0).unwrap(),
            Valence::try_new(2.0).unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn reset_clears_attachments_and_bootstrap_flag() {
        let graph = Arc::new(InMemoryGraphStore::new());
        graph.create_user(&uid()).await.unwrap();
        graph.set_bootstrapped(&uid(), true).await.unwrap();
        graph.upsert_attachment(&uid(), &attachment("health")).await.unwrap();
        graph.upsert_attachment(&uid(), &attachment("family")).await.unwrap();

        let ephemeral = Arc::new(InMemoryEphemeralStore::new());
        ephemeral
            .set_flag("session:s1:awaitingBootstrap", true)
            .await
            .unwrap();

        let h = ResetUserHandler::new(consenting_gate(), graph.clone(), ephemeral.clone());
        h.handle(ResetUserCommand {
            user_id: uid(),
            session_id: sid(),
        })
        .await
        .unwrap();

        assert!(graph.list_attachments(&uid()).await.unwrap().is_empty());
        let user = graph.find_user(&uid()).await.unwrap().unwrap();
        assert!(!user.bootstrapping_complete);
        assert!(!ephemeral
            .get_flag("session:s1:awaitingBootstrap")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn reset_is_idempotent() {
        let graph = Arc::new(InMemoryGraphStore::new());
        graph.create_user(&uid()).await.unwrap();
        let ephemeral = Arc::new(InMemoryEphemeralStore::new());
        let h = ResetUserHandler::new(consenting_gate(), graph.clone(), ephemeral);

        let cmd = ResetUserCommand {
            user_id: uid(),
            session_id: sid(),
        };
        h.handle(cmd.clone()).await.unwrap();
        h.handle(cmd).await.unwrap();
        assert!(graph.list_attachments(&uid()).await.unwrap().is_empty());
    }

    /// Graph store whose reset always fails.
    struct FailingGraph;

    #[async_trait]
    impl GraphStateStore for FailingGraph {
        async fn find_user(&self, _user_id: &UserId) -> Result<Option<UserNode>, DomainError> {
            Ok(None)
        }
        async fn create_user(&self, _user_id: &UserId) -> Result<(), DomainError> {
            Ok(())
        }
        async fn set_bootstrapped(
            &self,
            _user_id: &UserId,
            _complete: bool,
        ) -> Result<(), DomainError> {
            Ok(())
        }
        async fn upsert_attachment(
            &self,
            _user_id: &UserId,
            _attachment: &Attachment,
        ) -> Result<(), DomainError> {
            Ok(())
        }
        async fn list_attachments(
            &self,
            _user_id: &UserId,
        ) -> Result<Vec<Attachment>, DomainError> {
            Ok(vec![])
        }
        async fn delete_all_attachments(&self, _user_id: &UserId) -> Result<(), DomainError> {
            Ok(())
        }
        async fn reset_user_graph(&self, _user_id: &UserId) -> Result<(), DomainError> {
            Err(DomainError::graph_store("transaction rolled back"))
        }
        async fn append_information_event(
            &self,
            _user_id: &UserId,
            _event: &InformationEvent,
        ) -> Result<(), DomainError> {
            Ok(())
        }
        async fn list_recent_information_events(
            &self,
            _user_id: &UserId,
            _limit: u32,
            _offset: u32,
        ) -> Result<Vec<InformationEvent>, DomainError> {
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn graph_failure_leaves_ephemeral_key_untouched() {
        let ephemeral = Arc::new(InMemoryEphemeralStore::new());
        ephemeral
            .set_flag("session:s1:awaitingBootstrap", true)
            .await
            .unwrap();

        let h = ResetUserHandler::new(consenting_gate(), Arc::new(FailingGraph), ephemeral.clone());
        let err = h
            .handle(ResetUserCommand {
                user_id: uid(),
                session_id: sid(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::GraphStoreError);
        assert!(ephemeral
            .get_flag("session:s1:awaitingBootstrap")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn reset_without_data_processing_consent_is_denied() {
        let graph = Arc::new(InMemoryGraphStore::new());
        graph.create_user(&uid()).await.unwrap();
        graph.set_bootstrapped(&uid(), true).await.unwrap();

        let mut profile = ConsentProfile::onboarding_default();
        profile.set_permission(&Permission::parse(CONSENT_DATA_PROCESSING), false);
        let consent = InMemoryConsentStore::new();
        consent.put(uid(), profile);

        let ephemeral = Arc::new(InMemoryEphemeralStore::new());
        let h = ResetUserHandler::new(
            ConsentGate::new(Arc::new(consent)),
            graph.clone(),
            ephemeral,
        );

        let err = h
            .handle(ResetUserCommand {
                user_id: uid(),
                session_id: sid(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ConsentDenied);
        // Nothing mutated: the bootstrap flag survives.
        let user = graph.find_user(&uid()).await.unwrap().unwrap();
        assert!(user.bootstrapping_complete);
    }
}
