//! Shared fixture for service tests, wired over the in-memory store.

use std::sync::Arc;

use notez_auth::acl::AccessEvaluator;
use notez_auth::password::{PasswordHasher, PasswordValidator};
use notez_auth::session::SessionManager;
use notez_core::config::{AuthConfig, PasswordHashConfig, SessionConfig};
use notez_database::{MemoryStore, Repositories};
use notez_entity::note::{Note, NoteRole};
use notez_entity::user::{User, UserRole};
use uuid::Uuid;

use crate::auth::AuthService;
use crate::context::RequestContext;
use crate::invitation::{InvitationOutcome, InvitationService, InviteRequest};
use crate::membership::MemberService;
use crate::note::{NoteInput, NoteService};
use crate::profile::ProfileService;

pub(crate) const PASSWORD: &str = "password123";

pub(crate) struct Fixture {
    pub store: MemoryStore,
    pub sessions: Arc<SessionManager>,
    pub auth: AuthService,
    pub profile: ProfileService,
    pub notes: NoteService,
    pub invitations: InvitationService,
    pub members: MemberService,
}

impl Fixture {
    pub fn new() -> Self {
        let store = MemoryStore::new();
        let repos = Repositories::from_memory(store.clone());
        let hasher = Arc::new(
            PasswordHasher::new(&PasswordHashConfig {
                memory_kib: 64,
                iterations: 1,
                parallelism: 1,
                output_len: 32,
            })
            .unwrap(),
        );
        let validator = Arc::new(PasswordValidator::new(&AuthConfig::default()));
        let sessions = Arc::new(SessionManager::new(
            Arc::clone(&repos.sessions),
            SessionConfig::default(),
        ));
        let evaluator = Arc::new(AccessEvaluator::new(Arc::clone(&repos.notes)));

        Self {
            auth: AuthService::new(
                Arc::clone(&repos.users),
                Arc::clone(&sessions),
                Arc::clone(&hasher),
                Arc::clone(&validator),
            ),
            profile: ProfileService::new(Arc::clone(&repos.users), hasher, validator),
            notes: NoteService::new(Arc::clone(&repos.notes), Arc::clone(&evaluator)),
            invitations: InvitationService::new(
                Arc::clone(&repos.users),
                Arc::clone(&repos.memberships),
                Arc::clone(&repos.invitations),
                Arc::clone(&evaluator),
            ),
            members: MemberService::new(Arc::clone(&repos.memberships), evaluator),
            sessions,
            store,
        }
    }

    pub async fn user(&self, email: &str) -> User {
        self.auth
            .provision(email, PASSWORD, None, UserRole::User)
            .await
            .unwrap()
    }

    pub async fn login(&self, user: &User) -> RequestContext {
        let issued = self.sessions.create_session(user.id).await.unwrap();
        let resolved = self.sessions.resolve(&issued.token).await.unwrap();
        RequestContext::new(resolved, issued.token)
    }

    pub async fn actor(&self, email: &str) -> RequestContext {
        let user = self.user(email).await;
        self.login(&user).await
    }

    pub async fn note(&self, ctx: &RequestContext, title: &str) -> Note {
        self.notes
            .create(
                ctx,
                NoteInput {
                    title: title.to_string(),
                    content: Some("body".to_string()),
                },
            )
            .await
            .unwrap()
    }

    pub async fn invite(
        &self,
        owner: &RequestContext,
        note_id: Uuid,
        target: &RequestContext,
        role: NoteRole,
    ) -> Uuid {
        self.invitations
            .create(
                owner,
                InviteRequest {
                    email: target.user.email.clone(),
                    note_id,
                    role,
                },
            )
            .await
            .unwrap()
            .id
    }

    pub async fn share(
        &self,
        owner: &RequestContext,
        note_id: Uuid,
        target: &RequestContext,
        role: NoteRole,
    ) {
        let id = self.invite(owner, note_id, target, role).await;
        let outcome = self.invitations.respond(target, id, true).await.unwrap();
        assert_eq!(outcome, InvitationOutcome::Accepted);
    }
}
