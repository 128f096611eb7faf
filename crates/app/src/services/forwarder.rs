//! Selective forwarder — `turn_on` / `turn_off` for one light group.
//!
//! A group `turn_on` only reaches the members that are already lit, so
//! brightness or colour changes never wake the others. When nothing is lit
//! every member is addressed, unless the group has `stay_off`. A group
//! `turn_off` reaches every member unless the group has `prevent_off`.

use lightgroup_domain::attributes::{Attributes, TURN_OFF_KEYS, TURN_ON_KEYS};
use lightgroup_domain::context::Context;
use lightgroup_domain::decision::{Decision, SuppressReason, plan_turn_off, plan_turn_on};
use lightgroup_domain::entity::EntityState;
use lightgroup_domain::error::LightGroupError;
use lightgroup_domain::group::LightGroup;
use lightgroup_domain::id::EntityId;
use lightgroup_domain::service::{Service, ServiceCall};

use crate::ports::{ServiceDispatcher, StateReader};

/// What a group command turned into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// One call of `service` was dispatched to `targets` and completed.
    Forwarded {
        service: Service,
        targets: Vec<EntityId>,
    },
    /// No call was dispatched.
    Suppressed {
        service: Service,
        reason: SuppressReason,
    },
}

impl Outcome {
    #[must_use]
    pub fn targets(&self) -> &[EntityId] {
        match self {
            Self::Forwarded { targets, .. } => targets,
            Self::Suppressed { .. } => &[],
        }
    }

    #[must_use]
    pub fn is_suppressed(&self) -> bool {
        matches!(self, Self::Suppressed { .. })
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Forwarded { service, targets } => {
                write!(f, "{service} forwarded to ")?;
                for (idx, target) in targets.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{target}")?;
                }
                Ok(())
            }
            Self::Suppressed { service, reason } => write!(f, "{service} suppressed ({reason})"),
        }
    }
}

/// Use-case for a single light group.
///
/// Member state is read fresh on every command and never cached.
pub struct SelectiveForwarder<S, D> {
    group: LightGroup,
    states: S,
    dispatcher: D,
}

impl<S, D> SelectiveForwarder<S, D>
where
    S: StateReader,
    D: ServiceDispatcher,
{
    /// Create a forwarder for `group` reading from `states` and sending through `dispatcher`.
    pub fn new(group: LightGroup, states: S, dispatcher: D) -> Self {
        Self {
            group,
            states,
            dispatcher,
        }
    }

    #[must_use]
    pub fn group(&self) -> &LightGroup {
        &self.group
    }

    /// Handle a group `turn_on`.
    ///
    /// # Errors
    ///
    /// Propagates the dispatcher's error unchanged. Reading member states
    /// never fails.
    #[tracing::instrument(skip(self, attributes, context), fields(group = %self.group.name))]
    pub async fn turn_on(
        &self,
        attributes: &Attributes,
        context: &Context,
    ) -> Result<Outcome, LightGroupError> {
        let observed: Vec<(EntityId, EntityState)> = self
            .states
            .read_states(&self.group.members)
            .await
            .into_iter()
            .map(|(entity_id, state)| (entity_id, state.unwrap_or_default()))
            .collect();
        let decision = plan_turn_on(&self.group, &observed);
        self.execute(
            Service::TurnOn,
            decision,
            attributes.retain_keys(TURN_ON_KEYS),
            context,
        )
        .await
    }

    /// Handle a group `turn_off`.
    ///
    /// # Errors
    ///
    /// Propagates the dispatcher's error unchanged.
    #[tracing::instrument(skip(self, attributes, context), fields(group = %self.group.name))]
    pub async fn turn_off(
        &self,
        attributes: &Attributes,
        context: &Context,
    ) -> Result<Outcome, LightGroupError> {
        let decision = plan_turn_off(&self.group);
        self.execute(
            Service::TurnOff,
            decision,
            attributes.retain_keys(TURN_OFF_KEYS),
            context,
        )
        .await
    }

    /// Handle either service.
    ///
    /// # Errors
    ///
    /// Propagates the dispatcher's error unchanged.
    pub async fn call(
        &self,
        service: Service,
        attributes: &Attributes,
        context: &Context,
    ) -> Result<Outcome, LightGroupError> {
        match service {
            Service::TurnOn => self.turn_on(attributes, context).await,
            Service::TurnOff => self.turn_off(attributes, context).await,
        }
    }

    /// The group's aggregated state, computed from fresh member reads.
    ///
    /// Members the host has no state for are left out.
    pub async fn state(&self) -> EntityState {
        let observed = self.states.read_states(&self.group.members).await;
        let states: Vec<EntityState> = observed
            .into_iter()
            .filter_map(|(_, state)| state)
            .collect();
        self.group.aggregate_state(&states)
    }

    async fn execute(
        &self,
        service: Service,
        decision: Decision,
        data: Attributes,
        context: &Context,
    ) -> Result<Outcome, LightGroupError> {
        match decision {
            Decision::Suppress(reason) => {
                tracing::info!(%service, %reason, "command suppressed");
                Ok(Outcome::Suppressed { service, reason })
            }
            Decision::Forward(targets) => {
                tracing::debug!(
                    %service,
                    ?targets,
                    %data,
                    context = %context.id,
                    "forwarding command"
                );
                let call = ServiceCall::blocking(service, targets.clone(), data, context.child());
                self.dispatcher.dispatch(call).await?;
                Ok(Outcome::Forwarded { service, targets })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lightgroup_domain::error::DispatchError;
    use std::collections::HashMap;
    use std::future::Future;
    use std::sync::Mutex;

    #[derive(Default)]
    struct InMemoryStates {
        store: HashMap<EntityId, EntityState>,
    }

    impl InMemoryStates {
        fn with(pairs: &[(&str, EntityState)]) -> Self {
            Self {
                store: pairs.iter().map(|(m, s)| (id(m), *s)).collect(),
            }
        }
    }

    impl StateReader for InMemoryStates {
        fn read_state(
            &self,
            entity_id: &EntityId,
        ) -> impl Future<Output = Option<EntityState>> + Send {
            let state = self.store.get(entity_id).copied();
            async move { state }
        }
    }

    #[derive(Default)]
    struct RecordingDispatcher {
        calls: Mutex<Vec<ServiceCall>>,
        fail: bool,
    }

    impl RecordingDispatcher {
        fn failing() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        fn calls(&self) -> Vec<ServiceCall> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl ServiceDispatcher for RecordingDispatcher {
        fn dispatch(
            &self,
            call: ServiceCall,
        ) -> impl Future<Output = Result<(), LightGroupError>> + Send {
            let result = if self.fail {
                Err(DispatchError {
                    service: call.service.as_str(),
                    target: call.targets[0].to_string(),
                    reason: "unreachable".to_string(),
                }
                .into())
            } else {
                self.calls.lock().unwrap().push(call);
                Ok(())
            };
            async { result }
        }
    }

    fn id(raw: &str) -> EntityId {
        raw.parse().unwrap()
    }

    fn group(members: &[&str]) -> lightgroup_domain::group::LightGroupBuilder {
        LightGroup::builder()
            .name("Living Room")
            .members(members.iter().copied().map(id))
    }

    fn forwarder(
        group: LightGroup,
        states: &[(&str, EntityState)],
    ) -> SelectiveForwarder<InMemoryStates, RecordingDispatcher> {
        SelectiveForwarder::new(
            group,
            InMemoryStates::with(states),
            RecordingDispatcher::default(),
        )
    }

    #[tokio::test]
    async fn should_forward_turn_on_only_to_lit_members() {
        let svc = forwarder(
            group(&["light.a", "light.b", "light.c"]).build().unwrap(),
            &[
                ("light.a", EntityState::On),
                ("light.b", EntityState::Off),
                ("light.c", EntityState::Off),
            ],
        );

        let outcome = svc
            .turn_on(&Attributes::new().with("brightness", 80), &Context::new())
            .await
            .unwrap();

        assert_eq!(outcome.targets(), [id("light.a")]);
        let calls = svc.dispatcher.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].service, Service::TurnOn);
        assert_eq!(calls[0].targets, vec![id("light.a")]);
        assert_eq!(calls[0].data.get("brightness"), Some(&serde_json::json!(80)));
    }

    #[tokio::test]
    async fn should_forward_turn_on_to_every_member_when_all_off() {
        let svc = forwarder(
            group(&["light.a", "light.b"]).build().unwrap(),
            &[("light.a", EntityState::Off), ("light.b", EntityState::Off)],
        );

        let outcome = svc
            .turn_on(&Attributes::new(), &Context::new())
            .await
            .unwrap();

        assert_eq!(outcome.targets(), [id("light.a"), id("light.b")]);
        assert_eq!(svc.dispatcher.calls().len(), 1);
    }

    #[tokio::test]
    async fn should_not_dispatch_turn_on_when_all_off_and_stay_off() {
        let svc = forwarder(
            group(&["light.a", "light.b"]).stay_off(true).build().unwrap(),
            &[("light.a", EntityState::Off), ("light.b", EntityState::Off)],
        );

        let outcome = svc
            .turn_on(&Attributes::new(), &Context::new())
            .await
            .unwrap();

        assert_eq!(
            outcome,
            Outcome::Suppressed {
                service: Service::TurnOn,
                reason: SuppressReason::StayOff,
            }
        );
        assert!(svc.dispatcher.calls().is_empty());
    }

    #[tokio::test]
    async fn should_skip_member_with_unresolved_state() {
        let svc = forwarder(
            group(&["light.a", "light.b"]).build().unwrap(),
            &[("light.b", EntityState::On)],
        );

        let outcome = svc
            .turn_on(&Attributes::new(), &Context::new())
            .await
            .unwrap();

        assert_eq!(outcome.targets(), [id("light.b")]);
    }

    #[tokio::test]
    async fn should_drop_attributes_that_are_not_forwarded() {
        let svc = forwarder(
            group(&["light.a"]).build().unwrap(),
            &[("light.a", EntityState::On)],
        );
        let attrs = Attributes::new()
            .with("rgb_color", serde_json::json!([0, 0, 255]))
            .with("entity_id", "light.intruder");

        svc.turn_on(&attrs, &Context::new()).await.unwrap();

        let data = &svc.dispatcher.calls()[0].data;
        assert!(data.contains_key("rgb_color"));
        assert!(!data.contains_key("entity_id"));
    }

    #[tokio::test]
    async fn should_dispatch_blocking_call_under_child_context() {
        let svc = forwarder(
            group(&["light.a"]).build().unwrap(),
            &[("light.a", EntityState::On)],
        );
        let ctx = Context::new();

        svc.turn_on(&Attributes::new(), &ctx).await.unwrap();

        let call = &svc.dispatcher.calls()[0];
        assert!(call.blocking);
        assert_eq!(call.context.parent_id, Some(ctx.id));
    }

    #[tokio::test]
    async fn should_not_dispatch_turn_off_when_prevent_off() {
        let svc = forwarder(
            group(&["light.a", "light.b"]).prevent_off(true).build().unwrap(),
            &[("light.a", EntityState::On), ("light.b", EntityState::On)],
        );

        let outcome = svc
            .turn_off(&Attributes::new(), &Context::new())
            .await
            .unwrap();

        assert!(outcome.is_suppressed());
        assert!(svc.dispatcher.calls().is_empty());
    }

    #[tokio::test]
    async fn should_forward_turn_off_to_every_member_with_transition_only() {
        let svc = forwarder(
            group(&["light.a", "light.b"]).build().unwrap(),
            &[("light.a", EntityState::On), ("light.b", EntityState::Off)],
        );
        let attrs = Attributes::new()
            .with("transition", 3)
            .with("brightness", 255);

        let outcome = svc.turn_off(&attrs, &Context::new()).await.unwrap();

        assert_eq!(outcome.targets(), [id("light.a"), id("light.b")]);
        let call = &svc.dispatcher.calls()[0];
        assert_eq!(call.service, Service::TurnOff);
        assert_eq!(call.data, Attributes::new().with("transition", 3));
    }

    #[tokio::test]
    async fn should_propagate_dispatch_failure() {
        let svc = SelectiveForwarder::new(
            group(&["light.a"]).build().unwrap(),
            InMemoryStates::default(),
            RecordingDispatcher::failing(),
        );

        let result = svc.turn_on(&Attributes::new(), &Context::new()).await;

        assert!(matches!(result, Err(LightGroupError::Dispatch(_))));
    }

    #[tokio::test]
    async fn should_route_call_by_service() {
        let svc = forwarder(
            group(&["light.a"]).build().unwrap(),
            &[("light.a", EntityState::On)],
        );

        let outcome = svc
            .call(Service::TurnOff, &Attributes::new(), &Context::new())
            .await
            .unwrap();

        assert_eq!(
            outcome,
            Outcome::Forwarded {
                service: Service::TurnOff,
                targets: vec![id("light.a")],
            }
        );
    }

    #[tokio::test]
    async fn should_aggregate_group_state_from_members() {
        let any = forwarder(
            group(&["light.a", "light.b"]).build().unwrap(),
            &[("light.a", EntityState::On), ("light.b", EntityState::Off)],
        );
        let all = forwarder(
            group(&["light.a", "light.b"]).all(true).build().unwrap(),
            &[("light.a", EntityState::On), ("light.b", EntityState::Off)],
        );

        assert_eq!(any.state().await, EntityState::On);
        assert_eq!(all.state().await, EntityState::Off);
    }

    #[tokio::test]
    async fn should_leave_members_without_state_out_of_group_state() {
        let svc = forwarder(
            group(&["light.a", "light.b"]).all(true).build().unwrap(),
            &[("light.b", EntityState::On)],
        );

        assert_eq!(svc.state().await, EntityState::On);
    }

    #[tokio::test]
    async fn should_report_unknown_in_all_mode_when_member_is_unavailable() {
        let svc = forwarder(
            group(&["light.a", "light.b"]).all(true).build().unwrap(),
            &[("light.a", EntityState::On), ("light.b", EntityState::Unavailable)],
        );

        assert_eq!(svc.state().await, EntityState::Unknown);
    }

    #[test]
    fn should_describe_outcome() {
        let forwarded = Outcome::Forwarded {
            service: Service::TurnOn,
            targets: vec![id("light.a"), id("light.b")],
        };
        let suppressed = Outcome::Suppressed {
            service: Service::TurnOff,
            reason: SuppressReason::PreventOff,
        };
        assert_eq!(
            forwarded.to_string(),
            "turn_on forwarded to light.a, light.b"
        );
        assert_eq!(suppressed.to_string(), "turn_off suppressed (prevent_off)");
    }
}
