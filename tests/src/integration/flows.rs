//! # Integration Test Flows
//!
//! A bot wired the way a transport uses it: one `RegistryHandle`, handlers
//! registered at startup, raw JSON interactions decoded and dispatched.
//!
//! ## Flows Tested:
//!
//! 1. **Chat input → Command Registry**: root, grouped and privileged commands
//! 2. **Autocomplete / context menu → Command Registry**
//! 3. **Component / modal → Component Registry**: minted ids, owners, sentinels
//! 4. **Publication**: guild vs global bodies through a recording publisher

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use am_01_privilege_authority::PrivilegeConfig;
    use am_02_command_registry::{
        RegisterCommand, RegisterContextMenu, RegisterGroupedCommand, RegisterSubcommand,
        SubcommandGroup,
    };
    use am_03_component_registry::{
        ComponentContext, CustomIdMinter, MintOptions, ModalContext, RegisterComponent,
        RegisterModal, IGNORE_SENTINEL, THROW_SENTINEL,
    };
    use am_04_registry_handle::{
        CommandPublisher, CommandRoute, GuildCommandsTarget, PublishError, RegistryConfig,
        RegistryError, RegistryHandle,
    };
    use serde_json::{json, Value};
    use shared_types::{
        AutocompleteEvent, ChatInputEvent, ComponentKind, ContextMenuEvent, DispatchOutcome,
        HandleErrorKind, Interaction,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    /// Counts calls per handler name.
    #[derive(Default, Clone)]
    struct Calls(Arc<Mutex<Vec<String>>>);

    impl Calls {
        fn record(&self, name: impl Into<String>) {
            self.0.lock().unwrap().push(name.into());
        }

        fn count(&self, name: &str) -> usize {
            self.0.lock().unwrap().iter().filter(|n| *n == name).count()
        }

        fn total(&self) -> usize {
            self.0.lock().unwrap().len()
        }
    }

    #[derive(Debug)]
    struct Ticket {
        number: u32,
    }

    struct Bot {
        registry: RegistryHandle,
        calls: Calls,
        ticket_button: CustomIdMinter<Ticket>,
        report_modal: CustomIdMinter<Ticket>,
    }

    fn build_bot() -> Bot {
        let config = RegistryConfig::from_json(
            r#"{
                "version": "v1",
                "privilege": { "default_level": 0, "users": { "owner": 10, "mod": 5 } }
            }"#,
        )
        .unwrap();
        let mut registry = RegistryHandle::new(config).unwrap();
        let calls = Calls::default();

        let c = calls.clone();
        let a = calls.clone();
        registry
            .register_command(
                RegisterCommand::new(json!({ "name": "ping" }), move |_e: ChatInputEvent| {
                    let c = c.clone();
                    async move {
                        c.record("ping");
                        anyhow::Ok(())
                    }
                })
                .with_autocomplete(move |e: AutocompleteEvent| {
                    let a = a.clone();
                    async move {
                        a.record(format!("autocomplete:{}", e.focused.value));
                        anyhow::Ok(())
                    }
                }),
            )
            .unwrap();

        let c = calls.clone();
        let sub = registry
            .generate_subcommand(RegisterSubcommand::new("sub", move |_e: ChatInputEvent| {
                let c = c.clone();
                async move {
                    c.record("root.group.sub");
                    anyhow::Ok(())
                }
            }))
            .unwrap();
        let c = calls.clone();
        let open = registry
            .generate_subcommand(
                RegisterSubcommand::new("status", move |_e: ChatInputEvent| {
                    let c = c.clone();
                    async move {
                        c.record("root.status");
                        anyhow::Ok(())
                    }
                })
                .with_privilege(0),
            )
            .unwrap();
        registry
            .register_grouped_command(
                RegisterGroupedCommand::new(json!({ "name": "root" }))
                    .with_privilege(5)
                    .with_group(SubcommandGroup::new("group").with_subcommand(sub))
                    .with_subcommand(open),
            )
            .unwrap();

        let c = calls.clone();
        registry
            .register_command(RegisterCommand::new(
                json!({ "name": "explode" }),
                move |_e: ChatInputEvent| {
                    let c = c.clone();
                    async move {
                        c.record("explode");
                        Err::<(), _>(anyhow::anyhow!("kaboom"))
                    }
                },
            ))
            .unwrap();

        let c = calls.clone();
        registry
            .register_context_menu(
                RegisterContextMenu::new(
                    json!({ "name": "Inspect User", "type": 2 }),
                    move |e: ContextMenuEvent| {
                        let c = c.clone();
                        async move {
                            c.record(format!("inspect:{}", e.target_id));
                            anyhow::Ok(())
                        }
                    },
                )
                .with_privilege(5),
            )
            .unwrap();

        let c = calls.clone();
        let ticket_button = registry
            .register_component(
                RegisterComponent::new(
                    ComponentKind::Button,
                    move |ctx: ComponentContext<Ticket>| {
                        let c = c.clone();
                        async move {
                            c.record(format!("ticket:{}", ctx.data.number));
                            ctx.dropper.drop_instance();
                            anyhow::Ok(())
                        }
                    },
                )
                .with_identifier("ticket"),
            )
            .unwrap();

        let c = calls.clone();
        let report_modal = registry
            .register_modal(
                RegisterModal::new(move |ctx: ModalContext<Ticket>| {
                    let c = c.clone();
                    async move {
                        let reason = ctx.event.fields.get("reason").cloned().unwrap_or_default();
                        c.record(format!("report:{}:{}", ctx.data.number, reason));
                        anyhow::Ok(())
                    }
                })
                .with_identifier("report"),
            )
            .unwrap();

        Bot {
            registry,
            calls,
            ticket_button,
            report_modal,
        }
    }

    fn interaction(raw: Value) -> Interaction {
        serde_json::from_value(raw).unwrap()
    }

    fn chat_input(user: &str, name: &str, group: Option<&str>, sub: Option<&str>) -> Interaction {
        interaction(json!({
            "kind": "chat_input",
            "id": "1",
            "user": user,
            "guild": { "id": "g", "cached": true },
            "command_name": name,
            "subcommand_group": group,
            "subcommand": sub,
        }))
    }

    fn button(user: &str, custom_id: &str, cached: bool) -> Interaction {
        interaction(json!({
            "kind": "component",
            "id": "2",
            "user": user,
            "guild": { "id": "g", "cached": cached },
            "custom_id": custom_id,
            "component_kind": "button",
        }))
    }

    async fn dispatch(bot: &Bot, interaction: Interaction) -> Result<DispatchOutcome, RegistryError> {
        bot.registry.handle_interaction(&interaction).await
    }

    async fn dispatch_err(bot: &Bot, interaction: Interaction) -> HandleErrorKind {
        dispatch(bot, interaction).await.unwrap_err().kind()
    }

    // =============================================================================
    // COMMAND FLOWS
    // =============================================================================

    #[tokio::test]
    async fn test_ping_any_user() {
        let bot = build_bot();
        let outcome = dispatch(&bot, chat_input("nobody", "ping", None, None))
            .await
            .unwrap();
        assert_eq!(outcome, DispatchOutcome::Handled);
        assert_eq!(bot.calls.count("ping"), 1);
    }

    #[tokio::test]
    async fn test_grouped_command_gated_by_root_level() {
        let bot = build_bot();

        let kind = dispatch_err(&bot, chat_input("nobody", "root", Some("group"), Some("sub"))).await;
        assert_eq!(kind, HandleErrorKind::LackingPrivileges);
        assert_eq!(bot.calls.count("root.group.sub"), 0);

        dispatch(&bot, chat_input("mod", "root", Some("group"), Some("sub")))
            .await
            .unwrap();
        assert_eq!(bot.calls.count("root.group.sub"), 1);
    }

    #[tokio::test]
    async fn test_subcommand_override_opens_gate() {
        let bot = build_bot();
        dispatch(&bot, chat_input("nobody", "root", None, Some("status")))
            .await
            .unwrap();
        assert_eq!(bot.calls.count("root.status"), 1);
    }

    #[tokio::test]
    async fn test_unknown_paths_not_found() {
        let bot = build_bot();
        assert_eq!(
            dispatch_err(&bot, chat_input("owner", "root", Some("group"), Some("missing"))).await,
            HandleErrorKind::CommandNotFound
        );
        // The group path must be given exactly as registered.
        assert_eq!(
            dispatch_err(&bot, chat_input("owner", "root", None, Some("sub"))).await,
            HandleErrorKind::CommandNotFound
        );
    }

    #[tokio::test]
    async fn test_handler_failure_wrapped() {
        let bot = build_bot();
        let err = dispatch(&bot, chat_input("u", "explode", None, None))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), HandleErrorKind::CommandThrown);
        let cause = std::error::Error::source(&err).unwrap();
        assert_eq!(cause.to_string(), "kaboom");
        assert_eq!(bot.calls.count("explode"), 1);
    }

    #[tokio::test]
    async fn test_autocomplete_flow() {
        let bot = build_bot();
        let raw = json!({
            "kind": "autocomplete",
            "id": "3",
            "user": "u",
            "command_name": "ping",
            "focused": { "name": "target", "value": "ab" }
        });
        dispatch(&bot, interaction(raw)).await.unwrap();
        assert_eq!(bot.calls.count("autocomplete:ab"), 1);

        let raw = json!({
            "kind": "autocomplete",
            "id": "4",
            "user": "u",
            "command_name": "explode",
            "focused": { "name": "x" }
        });
        assert_eq!(
            dispatch_err(&bot, interaction(raw)).await,
            HandleErrorKind::AutocompleteNotFound
        );
    }

    #[tokio::test]
    async fn test_context_menu_flow() {
        let bot = build_bot();
        let menu = |user: &str, name: &str| {
            interaction(json!({
                "kind": "context_menu",
                "id": "5",
                "user": user,
                "command_name": name,
                "target_kind": "user",
                "target_id": "777"
            }))
        };

        assert_eq!(
            dispatch_err(&bot, menu("nobody", "Inspect User")).await,
            HandleErrorKind::LackingPrivileges
        );
        dispatch(&bot, menu("owner", "Inspect User")).await.unwrap();
        assert_eq!(bot.calls.count("inspect:777"), 1);
        assert_eq!(
            dispatch_err(&bot, menu("owner", "Ban User")).await,
            HandleErrorKind::MenuNotFound
        );
    }

    #[tokio::test]
    async fn test_unknown_kind_ignored() {
        let bot = build_bot();
        let outcome = dispatch(&bot, interaction(json!({ "kind": "ping", "id": "9" })))
            .await
            .unwrap();
        assert_eq!(outcome, DispatchOutcome::Ignored);
        assert_eq!(bot.calls.total(), 0);
    }

    // =============================================================================
    // COMPONENT FLOWS
    // =============================================================================

    #[tokio::test(start_paused = true)]
    async fn test_one_shot_button() {
        let bot = build_bot();
        let token = bot
            .ticket_button
            .mint(Ticket { number: 12 }, MintOptions::default().owned_by("alice"))
            .unwrap();

        assert_eq!(
            dispatch_err(&bot, button("bob", &token, true)).await,
            HandleErrorKind::DisallowedUser
        );

        dispatch(&bot, button("alice", &token, true)).await.unwrap();
        assert_eq!(bot.calls.count("ticket:12"), 1);

        // The handler dropped its own instance.
        assert_eq!(
            dispatch_err(&bot, button("alice", &token, true)).await,
            HandleErrorKind::InstanceNotFound
        );
        assert_eq!(bot.calls.count("ticket:12"), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sentinels_and_guild_guard() {
        let bot = build_bot();

        let outcome = dispatch(&bot, button("u", IGNORE_SENTINEL, false)).await.unwrap();
        assert_eq!(outcome, DispatchOutcome::Ignored);

        assert_eq!(
            dispatch_err(&bot, button("u", THROW_SENTINEL, true)).await,
            HandleErrorKind::ThrowComponentTriggered
        );

        let token = bot
            .ticket_button
            .mint(Ticket { number: 1 }, MintOptions::default())
            .unwrap();
        assert_eq!(
            dispatch_err(&bot, button("u", &token, false)).await,
            HandleErrorKind::GuildNotCached
        );
        assert_eq!(bot.calls.total(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_foreign_custom_id_ignored() {
        let bot = build_bot();
        let outcome = dispatch(&bot, button("u", "another-bot-button", true))
            .await
            .unwrap();
        assert_eq!(outcome, DispatchOutcome::Ignored);
    }

    #[tokio::test(start_paused = true)]
    async fn test_modal_submission() {
        let bot = build_bot();
        let token = bot
            .report_modal
            .mint(Ticket { number: 4 }, MintOptions::default())
            .unwrap();

        let raw = json!({
            "kind": "modal_submit",
            "id": "6",
            "user": "u",
            "guild": { "id": "g", "cached": true },
            "custom_id": token,
            "fields": { "reason": "spam" }
        });
        dispatch(&bot, interaction(raw)).await.unwrap();
        assert_eq!(bot.calls.count("report:4:spam"), 1);

        // Modal instances do not resolve through the component table.
        assert_eq!(
            dispatch_err(&bot, button("u", &token, true)).await,
            HandleErrorKind::ComponentNotFound
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_redeploy_invalidates_old_components() {
        let bot = build_bot();
        let token = bot
            .ticket_button
            .mint(Ticket { number: 2 }, MintOptions::default())
            .unwrap();

        let redeployed = build_bot_with_version("v2");
        let err = redeployed
            .handle_interaction(&button("u", &token, true))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), HandleErrorKind::OutdatedComponentTriggered);
    }

    fn build_bot_with_version(version: &str) -> RegistryHandle {
        let mut registry = RegistryHandle::new(
            RegistryConfig::default()
                .with_version(version)
                .with_privilege(PrivilegeConfig::default()),
        )
        .unwrap();
        registry
            .register_component(
                RegisterComponent::new(ComponentKind::Button, |_ctx: ComponentContext<Ticket>| async {
                    anyhow::Ok(())
                })
                .with_identifier("ticket"),
            )
            .unwrap();
        registry
    }

    // =============================================================================
    // PUBLICATION
    // =============================================================================

    #[derive(Default)]
    struct RecordingPublisher {
        posts: Mutex<Vec<(CommandRoute, Vec<Value>)>>,
        count: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl CommandPublisher for RecordingPublisher {
        async fn post_commands(
            &self,
            route: &CommandRoute,
            bodies: &[Value],
        ) -> Result<Vec<Value>, PublishError> {
            self.count.fetch_add(1, Ordering::SeqCst);
            self.posts.lock().unwrap().push((route.clone(), bodies.to_vec()));
            Ok(bodies.to_vec())
        }
    }

    fn names(bodies: &[Value]) -> Vec<&str> {
        bodies.iter().filter_map(|b| b["name"].as_str()).collect()
    }

    #[tokio::test]
    async fn test_publication_respects_admin_flag() {
        let bot = build_bot();
        let publisher = RecordingPublisher::default();

        assert_eq!(names(&bot.registry.command_post_body()), vec!["ping", "explode"]);
        assert_eq!(
            names(&bot.registry.all_command_post_body()),
            vec!["ping", "root", "explode", "Inspect User"]
        );

        bot.registry
            .load_guild_commands(&publisher, GuildCommandsTarget::new("app", "g").with_admin())
            .await
            .unwrap();
        bot.registry.load_global_commands(&publisher, "app").await.unwrap();

        let posts = publisher.posts.lock().unwrap();
        assert_eq!(publisher.count.load(Ordering::SeqCst), 2);
        assert_eq!(names(&posts[0].1).len(), 4);
        assert_eq!(
            posts[1],
            (
                CommandRoute::Global {
                    client_id: "app".to_string()
                },
                vec![json!({ "name": "ping" }), json!({ "name": "explode" })]
            )
        );
    }
}
