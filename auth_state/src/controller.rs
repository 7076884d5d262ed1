use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use common::identity::Identity;
use futures::future::Either;
use session::{SessionContext, SessionStore};
use tokio::sync::watch;

use crate::directory::Directory;
use crate::identity::{AuthEvent, IdentityService};
use crate::resolver::{self, DEFAULT_FETCH_TIMEOUT};
use crate::snapshot::AuthSnapshot;

/// Owns the authoritative [`AuthSnapshot`] and its hydration lifecycle.
///
/// Hydrations triggered by fresher identity events supersede older ones:
/// each hydration takes a generation number at call time (events are handed
/// to the controller in emission order), and a completion only publishes if
/// no newer generation has started since. In-flight fetches are never
/// cancelled; their results are simply discarded.
pub struct AuthStateController<I, D, S> {
    identity: I,
    directory: D,
    session: SessionContext<S>,
    fetch_timeout: Duration,
    generation: AtomicU64,
    snapshot_tx: watch::Sender<AuthSnapshot>,
}

impl<I, D, S> AuthStateController<I, D, S>
where
    I: IdentityService,
    D: Directory,
    S: SessionStore,
{
    pub fn new(identity: I, directory: D, session: SessionContext<S>) -> Self {
        Self::with_fetch_timeout(identity, directory, session, DEFAULT_FETCH_TIMEOUT)
    }

    pub fn with_fetch_timeout(
        identity: I,
        directory: D,
        session: SessionContext<S>,
        fetch_timeout: Duration,
    ) -> Self {
        let (snapshot_tx, _) = watch::channel(AuthSnapshot::initial());
        AuthStateController {
            identity,
            directory,
            session,
            fetch_timeout,
            generation: AtomicU64::new(0),
            snapshot_tx,
        }
    }

    /// The currently published snapshot.
    pub fn snapshot(&self) -> AuthSnapshot {
        self.snapshot_tx.borrow().clone()
    }

    /// Subscribes to snapshot publications. The subscription ends when the
    /// receiver is dropped.
    pub fn subscribe(&self) -> watch::Receiver<AuthSnapshot> {
        self.snapshot_tx.subscribe()
    }

    pub fn session(&self) -> &SessionContext<S> {
        &self.session
    }

    /// Runs one hydration cycle and publishes the result.
    ///
    /// The generation number is taken synchronously, before the returned
    /// future is first polled, so calling order — event order — decides
    /// which hydration is authoritative no matter how the fetches complete.
    /// Pass the identity when the provider already pushed one with the
    /// event; it saves the session round trip.
    pub fn hydrate(
        &self,
        identity_override: Option<Identity>,
    ) -> impl Future<Output = AuthSnapshot> + '_ {
        let generation = self.begin_generation();

        // Keep prior fields visible while loading; consumers are required
        // not to route on them until loading goes false again.
        let mut loading = self.snapshot_tx.borrow().clone();
        loading.loading = true;
        self.publish(generation, &loading);

        async move {
            // Every fallible step inside degrades to an absent field, so
            // this always publishes a snapshot with loading=false and
            // consumers can never hang in the loading state.
            let snapshot = self.run_hydration(identity_override).await;
            self.publish(generation, &snapshot);
            snapshot
        }
    }

    async fn run_hydration(&self, identity_override: Option<Identity>) -> AuthSnapshot {
        let identity = match identity_override {
            Some(identity) => Some(identity),
            None => match self.identity.current_session().await {
                Ok(identity) => identity,
                Err(err) => {
                    log::warn!("session query failed, treating as anonymous: {}", err);
                    None
                }
            },
        };

        let Some(identity) = identity else {
            return AuthSnapshot::anonymous();
        };

        let (profile, business) =
            resolver::resolve(&self.directory, &identity, self.fetch_timeout).await;
        AuthSnapshot::ready(identity, profile, business)
    }

    /// Reacts to an identity-provider notification. Sign-out resets the
    /// snapshot and wipes the session flags synchronously, before the
    /// returned future is polled; sign-in and token refresh re-hydrate with
    /// the pushed identity.
    pub fn on_identity_event(
        &self,
        event: AuthEvent,
    ) -> impl Future<Output = AuthSnapshot> + '_ {
        match event {
            AuthEvent::SignedIn(identity) | AuthEvent::TokenRefreshed(identity) => {
                Either::Left(self.hydrate(Some(identity)))
            }
            AuthEvent::SignedOut => {
                let generation = self.begin_generation();
                // wipes every session flag, the impersonation record included
                self.session.clear();
                let snapshot = AuthSnapshot::anonymous();
                self.publish(generation, &snapshot);
                Either::Right(std::future::ready(snapshot))
            }
        }
    }

    /// Full sign-out: best-effort upstream revocation, then the local
    /// `SignedOut` transition. Revocation failures are logged and swallowed;
    /// the local session ends regardless.
    pub async fn sign_out(&self) -> AuthSnapshot {
        if let Err(err) = self.identity.sign_out().await {
            log::debug!("upstream sign-out revocation failed: {}", err);
        }
        self.on_identity_event(AuthEvent::SignedOut).await
    }

    fn begin_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Publishes unless a newer generation has started since this one.
    fn publish(&self, generation: u64, snapshot: &AuthSnapshot) -> bool {
        if self.generation.load(Ordering::SeqCst) != generation {
            return false;
        }
        self.snapshot_tx.send_replace(snapshot.clone());
        true
    }
}
