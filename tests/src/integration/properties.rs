//! # Registry Properties
//!
//! Invariants every build of the registry must keep, checked across crate
//! boundaries:
//!
//! - command keys resolve exactly as registered
//! - grouped roots are published as admin when any member is gated
//! - minted custom ids decode back to their template and instance
//! - version, TTL and drop semantics of component instances
//! - privilege rejection never reaches the handler

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use am_01_privilege_authority::{PrivilegeAuthority, PrivilegeConfig};
    use am_02_command_registry::{
        CommandKey, CommandRegistry, RegisterCommand, RegisterGroupedCommand, RegisterSubcommand,
        SubcommandGroup,
    };
    use am_03_component_registry::{
        decode, ComponentConfig, ComponentContext, ComponentRegistry, CustomIdMinter,
        InstanceStore, MintOptions, RegisterComponent, CUSTOM_ID_PREFIX,
    };
    use am_04_registry_handle::{RegistryConfig, RegistryHandle};
    use proptest::prelude::*;
    use serde_json::json;
    use shared_types::{
        ChatInputEvent, ComponentEvent, ComponentKind, DispatchOutcome, GuildContext,
        HandleErrorKind,
    };

    // =============================================================================
    // HELPERS
    // =============================================================================

    type Done = std::future::Ready<anyhow::Result<()>>;

    fn done() -> Done {
        std::future::ready(Ok(()))
    }

    /// Command handler that only counts its invocations.
    fn spy() -> (Arc<AtomicUsize>, impl Fn(ChatInputEvent) -> Done + Send + Sync) {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let handler = move |_e: ChatInputEvent| {
            counter.fetch_add(1, Ordering::SeqCst);
            done()
        };
        (hits, handler)
    }

    fn command_registry(default_level: u32) -> CommandRegistry {
        CommandRegistry::new(Arc::new(PrivilegeAuthority::new(default_level)))
    }

    fn component_registry(version: &str, store: Arc<InstanceStore>) -> ComponentRegistry {
        ComponentRegistry::with_store(ComponentConfig::default().with_version(version), store)
            .unwrap()
    }

    fn spy_button(
        registry: &mut ComponentRegistry,
        identifier: &str,
    ) -> (Arc<AtomicUsize>, CustomIdMinter<u32>) {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let minter = registry
            .register_component(
                RegisterComponent::new(ComponentKind::Button, move |_ctx: ComponentContext<u32>| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    done()
                })
                .with_identifier(identifier),
            )
            .unwrap();
        (hits, minter)
    }

    fn press(user: &str, custom_id: &str) -> ComponentEvent {
        ComponentEvent::button("1", user, custom_id).in_guild(GuildContext::cached("g"))
    }

    fn segment() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9_-]{0,15}"
    }

    // =============================================================================
    // COMMAND KEYS
    // =============================================================================

    proptest! {
        #[test]
        fn prop_registered_keys_resolve(root in segment(), group in segment(), sub in segment()) {
            let mut registry = command_registry(0);
            let (_, handler) = spy();
            let sub_ref = registry
                .generate_subcommand(RegisterSubcommand::new(sub.clone(), handler).with_privilege(3))
                .unwrap();
            let keys = registry
                .register_grouped_command(
                    RegisterGroupedCommand::new(json!({ "name": root.clone() }))
                        .with_group(SubcommandGroup::new(group.clone()).with_subcommand(sub_ref)),
                )
                .unwrap();

            prop_assert_eq!(keys.len(), 1);
            let expected = CommandKey::grouped(&root, &group, &sub).unwrap();
            prop_assert_eq!(&keys[0], &expected);

            let event = ChatInputEvent::new("1", "u", root.clone())
                .with_group(group.clone())
                .with_subcommand(sub.clone());
            prop_assert_eq!(CommandKey::from_path(&event).unwrap(), expected.clone());

            let definition = registry.resolve(&expected).unwrap();
            prop_assert_eq!(definition.required_privilege_level, 3);
            prop_assert_eq!(expected.root_name(), root.as_str());
        }

        #[test]
        fn prop_admin_bubbles_from_any_member(levels in proptest::collection::vec(0u32..4, 1..5)) {
            let mut registry = command_registry(1);
            let mut group = SubcommandGroup::new("group");
            for (i, level) in levels.iter().enumerate() {
                let (_, handler) = spy();
                let sub = registry
                    .generate_subcommand(
                        RegisterSubcommand::new(format!("sub{}", i), handler).with_privilege(*level),
                    )
                    .unwrap();
                group = group.with_subcommand(sub);
            }
            registry
                .register_grouped_command(RegisterGroupedCommand::new(json!({ "name": "root" })).with_group(group))
                .unwrap();

            let published = registry.published();
            prop_assert_eq!(published.len(), 1);
            prop_assert_eq!(published[0].admin, levels.iter().any(|level| *level > 1));
        }
    }

    #[test]
    fn test_ping_scenario() {
        let mut registry = command_registry(0);
        let (_, handler) = spy();
        let key = registry
            .register_command(RegisterCommand::new(json!({ "name": "ping" }), handler))
            .unwrap();

        assert_eq!(key.as_str(), "ping");
        let definition = registry.resolve(&key).unwrap();
        assert_eq!(definition.required_privilege_level, 0);
        assert!(registry.authority().meets(&"anyone".into(), 0));
        assert!(!registry.published()[0].admin);
    }

    #[test]
    fn test_root_group_sub_scenario() {
        let mut registry = command_registry(0);
        let (_, handler) = spy();
        let sub = registry
            .generate_subcommand(RegisterSubcommand::new("sub", handler))
            .unwrap();
        registry
            .register_grouped_command(
                RegisterGroupedCommand::new(json!({ "name": "root" }))
                    .with_privilege(5)
                    .with_group(SubcommandGroup::new("group").with_subcommand(sub)),
            )
            .unwrap();

        let key = CommandKey::grouped("root", "group", "sub").unwrap();
        assert_eq!(key.as_str(), "root.group.sub");
        assert_eq!(registry.resolve(&key).unwrap().required_privilege_level, 5);
        assert_eq!(registry.published().len(), 1);
        assert!(registry.published()[0].admin);
    }

    #[tokio::test]
    async fn test_privilege_rejection_never_invokes_handler() {
        let mut handle = RegistryHandle::new(
            RegistryConfig::default()
                .with_version("v1")
                .with_privilege(PrivilegeConfig::default().with_user("admin", 7)),
        )
        .unwrap();
        let (hits, handler) = spy();
        handle
            .register_command(RegisterCommand::new(json!({ "name": "purge" }), handler).with_privilege(7))
            .unwrap();

        for user in ["guest", "42", "someone-else"] {
            let err = handle
                .commands()
                .handle_chat_input(&ChatInputEvent::new("1", user, "purge"))
                .await
                .unwrap_err();
            assert_eq!(err.kind(), HandleErrorKind::LackingPrivileges);
        }
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        handle
            .commands()
            .handle_chat_input(&ChatInputEvent::new("1", "admin", "purge"))
            .await
            .unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    // =============================================================================
    // CUSTOM IDS
    // =============================================================================

    proptest! {
        #[test]
        fn prop_minted_ids_decode_to_their_parts(
            identifier in "[A-Za-z0-9_-]{1,20}",
            instance_id in "[A-Za-z0-9_-]{1,20}",
        ) {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()
                .unwrap();
            let _guard = runtime.enter();

            let store = Arc::new(InstanceStore::new());
            let mut registry = component_registry("v1", store.clone());
            let (_, minter) = spy_button(&mut registry, &identifier);

            let token = minter
                .mint(1, MintOptions::default().with_instance_id(instance_id.clone()))
                .unwrap();
            let parts = decode(&token).unwrap();

            prop_assert_eq!(parts.prefix, CUSTOM_ID_PREFIX);
            prop_assert_eq!(parts.version, "v1");
            prop_assert_eq!(parts.template_id, identifier.as_str());
            prop_assert_eq!(parts.instance_id, instance_id.as_str());
            prop_assert!(store.contains(&instance_id));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_version_mismatch_is_outdated_even_when_instance_lives() {
        let store = Arc::new(InstanceStore::new());
        let mut old = component_registry("1", store.clone());
        let (_, old_minter) = spy_button(&mut old, "vote");
        let token = old_minter
            .mint(1, MintOptions::default().with_instance_id("poll"))
            .unwrap();

        let mut current = component_registry("2", store.clone());
        let (hits, _) = spy_button(&mut current, "vote");

        assert!(store.contains("poll"));
        let err = current.handle_component(&press("u", &token)).await.unwrap_err();
        assert_eq!(err.kind(), HandleErrorKind::OutdatedComponentTriggered);

        store.drop_instance("poll");
        let err = current.handle_component(&press("u", &token)).await.unwrap_err();
        assert_eq!(err.kind(), HandleErrorKind::OutdatedComponentTriggered);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    // =============================================================================
    // INSTANCE LIFETIME
    // =============================================================================

    #[tokio::test(start_paused = true)]
    async fn test_dispatch_before_and_after_ttl() {
        let mut registry = component_registry("v1", Arc::new(InstanceStore::new()));
        let (hits, minter) = spy_button(&mut registry, "vote");

        let owned = minter
            .mint(
                1,
                MintOptions::default()
                    .owned_by("alice")
                    .with_ttl(Duration::from_secs(60)),
            )
            .unwrap();
        let open = minter
            .mint(2, MintOptions::default().with_ttl(Duration::from_secs(60)))
            .unwrap();

        tokio::time::advance(Duration::from_secs(59)).await;
        assert_eq!(
            registry.handle_component(&press("alice", &owned)).await.unwrap(),
            DispatchOutcome::Handled
        );
        assert_eq!(
            registry.handle_component(&press("bob", &open)).await.unwrap(),
            DispatchOutcome::Handled
        );
        assert_eq!(hits.load(Ordering::SeqCst), 2);

        tokio::time::advance(Duration::from_secs(2)).await;
        for token in [&owned, &open] {
            let err = registry
                .handle_component(&press("alice", token))
                .await
                .unwrap_err();
            assert_eq!(err.kind(), HandleErrorKind::InstanceNotFound);
        }
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_ttl_expires_immediately() {
        let store = Arc::new(InstanceStore::new());
        let mut registry = component_registry("v1", store.clone());
        let (hits, minter) = spy_button(&mut registry, "flash");

        let token = minter
            .mint(1, MintOptions::default().with_ttl(Duration::ZERO))
            .unwrap();
        tokio::time::advance(Duration::from_millis(1)).await;

        let err = registry.handle_component(&press("u", &token)).await.unwrap_err();
        assert_eq!(err.kind(), HandleErrorKind::InstanceNotFound);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert!(store.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_drop_is_idempotent() {
        let store = Arc::new(InstanceStore::new());
        let mut registry = component_registry("v1", store.clone());
        let (hits, minter) = spy_button(&mut registry, "once");

        let token = minter
            .mint(1, MintOptions::default().with_instance_id("abc"))
            .unwrap();

        assert!(store.drop_instance("abc"));
        let err = registry.handle_component(&press("u", &token)).await.unwrap_err();
        assert_eq!(err.kind(), HandleErrorKind::InstanceNotFound);

        assert!(!store.drop_instance("abc"));
        let err = registry.handle_component(&press("u", &token)).await.unwrap_err();
        assert_eq!(err.kind(), HandleErrorKind::InstanceNotFound);

        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert_eq!(store.stats().dropped, 1);
    }
}
