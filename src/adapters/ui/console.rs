//! Implements InputPort. Inquire-based interactive composition flow.
//!
//! One screen per workflow step; the session owns all state, this adapter
//! only renders and forwards user input.

use crate::adapters::ui::progress::PublishProgress;
use crate::domain::caption::{TriggerKind, active_trigger, insert_completion, remaining_chars};
use crate::domain::{
    Adjustments, CompositionDraft, DraftAction, Filter, GatewayError, PostVisibility,
    PrivacyConfig, PrivacyToggle, StoryVisibility, Timezone, UploadType, ValidationError,
    WorkflowStep,
};
use crate::ports::{Directory, InputPort, MediaSource, Publisher};
use crate::usecases::ComposeSession;
use async_trait::async_trait;
use chrono::NaiveTime;
use inquire::error::InquireError;
use inquire::ui::{Color, RenderConfig, StyleSheet, Styled};
use inquire::{Confirm, DateSelect, MultiSelect, Select, Text};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// How many candidates to pull from the picker for browsing.
const PICKER_BATCH: usize = 50;

/// Global inquire render config. Call once at startup, before any prompt.
pub fn apply_theme() {
    let mut cfg = RenderConfig::default_colored();
    cfg.prompt_prefix = Styled::new("›").with_fg(Color::LightMagenta);
    cfg.answered_prompt_prefix = Styled::new("✔").with_fg(Color::LightMagenta);
    cfg.highlighted_option_prefix = Styled::new("❯").with_fg(Color::LightCyan);
    cfg.selected_checkbox = Styled::new("[x]").with_fg(Color::LightMagenta);
    cfg.answer = StyleSheet::new().with_fg(Color::LightCyan);
    inquire::set_global_render_config(cfg);
}

/// Outcome of one step screen.
enum Flow {
    Continue,
    Abandon,
    Done(String),
}

/// Map a prompt result: Esc/Ctrl-C become None, real failures become errors.
fn prompt_opt<T>(result: Result<T, InquireError>) -> Result<Option<T>, GatewayError> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(GatewayError::Prompt(e.to_string())),
    }
}

fn print_validation(err: &ValidationError) {
    println!("  ! {err}");
}

/// Console adapter. Inquire prompts over the session, ports for collaborators.
pub struct ConsoleInput {
    media_source: Arc<dyn MediaSource>,
    publisher: Arc<dyn Publisher>,
    directory: Arc<dyn Directory>,
    publish_timeout: Duration,
}

impl ConsoleInput {
    pub fn new(
        media_source: Arc<dyn MediaSource>,
        publisher: Arc<dyn Publisher>,
        directory: Arc<dyn Directory>,
        publish_timeout: Duration,
    ) -> Self {
        Self {
            media_source,
            publisher,
            directory,
            publish_timeout,
        }
    }

    fn prompt_upload_type(&self) -> Result<Option<UploadType>, GatewayError> {
        let options = vec![
            "Post — Share photos and videos",
            "Story — 24-hour content",
            "Reel — Short-form videos",
        ];
        let choice = prompt_opt(Select::new("What are you creating?", options).prompt())?;
        Ok(choice.map(|c| match c.chars().next() {
            Some('S') => UploadType::Story,
            Some('R') => UploadType::Reel,
            _ => UploadType::Post,
        }))
    }

    async fn upload_step(&self, session: &ComposeSession) -> Result<Flow, GatewayError> {
        let draft = match session.draft().await {
            Ok(d) => d,
            Err(_) => return Ok(Flow::Abandon),
        };
        let upload_type = draft.upload_type;

        let menu = vec!["Select media", "Change content type", "Quit"];
        let Some(choice) = prompt_opt(Select::new("Upload", menu).prompt())? else {
            return Ok(Flow::Abandon);
        };
        match choice {
            "Change content type" => {
                if let Some(t) = self.prompt_upload_type()? {
                    if let Err(e) = session.set_upload_type(t).await {
                        print_validation(&e);
                    }
                }
                Ok(Flow::Continue)
            }
            "Quit" => Ok(Flow::Abandon),
            _ => {
                let candidates = self
                    .media_source
                    .request_files(upload_type.accept(), PICKER_BATCH)
                    .await?;
                if candidates.is_empty() {
                    println!("  No media found. Drop files into the media directory and retry.");
                    return Ok(Flow::Continue);
                }
                let labels: Vec<String> = candidates
                    .iter()
                    .map(|f| format!("{} ({} KB, {})", f.source_handle, f.size_bytes / 1024, f.mime))
                    .collect();

                let picked: Vec<usize> = if upload_type.max_media() == 1 {
                    match prompt_opt(Select::new("Select one file", labels.clone()).prompt())? {
                        Some(label) => labels.iter().position(|l| *l == label).into_iter().collect(),
                        None => return Ok(Flow::Continue),
                    }
                } else {
                    match prompt_opt(MultiSelect::new("Select files", labels.clone()).prompt())? {
                        Some(chosen) => chosen
                            .iter()
                            .filter_map(|c| labels.iter().position(|l| l == c))
                            .collect(),
                        None => return Ok(Flow::Continue),
                    }
                };
                if picked.is_empty() {
                    return Ok(Flow::Continue);
                }
                let files = picked.into_iter().map(|i| candidates[i].clone()).collect();
                match session.select_media(files).await {
                    Ok(count) => println!("  {count} file(s) added."),
                    Err(e) => print_validation(&e),
                }
                Ok(Flow::Continue)
            }
        }
    }

    async fn edit_step(&self, session: &ComposeSession) -> Result<Flow, GatewayError> {
        let menu = vec!["Apply filter", "Fine-tune adjustments", "Add details", "Back"];
        let Some(choice) = prompt_opt(Select::new("Edit", menu).prompt())? else {
            return Ok(Flow::Abandon);
        };
        match choice {
            "Apply filter" => {
                let names: Vec<&str> = Filter::ALL.iter().map(|f| f.name()).collect();
                if let Some(name) = prompt_opt(Select::new("Filter", names).prompt())? {
                    let filter = Filter::ALL
                        .into_iter()
                        .find(|f| f.name() == name)
                        .unwrap_or_default();
                    if let Err(e) = session.dispatch(DraftAction::SetFilter(filter)).await {
                        print_validation(&e);
                    }
                }
                Ok(Flow::Continue)
            }
            "Fine-tune adjustments" => {
                let adjustments = self.prompt_adjustments()?;
                if let Some(a) = adjustments {
                    if let Err(e) = session.dispatch(DraftAction::SetAdjustments(a)).await {
                        print_validation(&e);
                    }
                }
                Ok(Flow::Continue)
            }
            "Add details" => {
                if let Err(e) = session.advance().await {
                    print_validation(&e);
                }
                Ok(Flow::Continue)
            }
            _ => {
                let _ = session.retreat().await;
                Ok(Flow::Continue)
            }
        }
    }

    fn prompt_adjustments(&self) -> Result<Option<Adjustments>, GatewayError> {
        let mut values = [0i16; 5];
        let controls = [
            ("Brightness (-50..50)", -50i16, 50i16),
            ("Contrast (-50..50)", -50, 50),
            ("Saturation (-50..50)", -50, 50),
            ("Warmth (-50..50)", -50, 50),
            ("Vignette (0..100)", 0, 100),
        ];
        for (i, (label, _, _)) in controls.iter().enumerate() {
            let Some(raw) = prompt_opt(Text::new(label).with_default("0").prompt())? else {
                return Ok(None);
            };
            values[i] = raw.trim().parse().unwrap_or(0);
        }
        Ok(Some(
            Adjustments {
                brightness: values[0].clamp(-128, 127) as i8,
                contrast: values[1].clamp(-128, 127) as i8,
                saturation: values[2].clamp(-128, 127) as i8,
                warmth: values[3].clamp(-128, 127) as i8,
                vignette: values[4].clamp(0, 255) as u8,
            }
            .clamped(),
        ))
    }

    async fn details_step(&self, session: &ComposeSession) -> Result<Flow, GatewayError> {
        let draft = match session.draft().await {
            Ok(d) => d,
            Err(_) => return Ok(Flow::Abandon),
        };
        let menu = vec![
            "Caption",
            "Tag people",
            "Location",
            "Privacy",
            "Schedule",
            "Review & publish",
            "Back",
        ];
        let Some(choice) = prompt_opt(Select::new("Details", menu).prompt())? else {
            return Ok(Flow::Abandon);
        };
        match choice {
            "Caption" => self.caption_editor(session, &draft).await?,
            "Tag people" => self.user_tagger(session, &draft).await?,
            "Location" => self.location_tagger(session, &draft).await?,
            "Privacy" => self.privacy_editor(session, &draft).await?,
            "Schedule" => self.schedule_editor(session, &draft).await?,
            "Review & publish" => {
                if let Err(e) = session.advance().await {
                    print_validation(&e);
                }
            }
            _ => {
                let _ = session.retreat().await;
            }
        }
        Ok(Flow::Continue)
    }

    async fn caption_editor(
        &self,
        session: &ComposeSession,
        draft: &CompositionDraft,
    ) -> Result<(), GatewayError> {
        println!(
            "  {} characters remaining",
            remaining_chars(&draft.caption, draft.upload_type)
        );
        let Some(mut caption) = prompt_opt(
            Text::new("Caption:")
                .with_initial_value(&draft.caption)
                .prompt(),
        )?
        else {
            return Ok(());
        };

        // Offer completions when the text ends in an open #tag/@mention.
        if let Some(trigger) = active_trigger(&caption, caption.len()) {
            let completions: Vec<String> = match trigger.kind {
                TriggerKind::Hashtag => self.directory.suggest_hashtags(&trigger.partial).await?,
                TriggerKind::Mention => self
                    .directory
                    .search_users(trigger.partial.trim_start_matches('@'))
                    .await?
                    .into_iter()
                    .map(|u| format!("@{}", u.username))
                    .collect(),
            };
            if !completions.is_empty() {
                let mut options = vec!["(keep as typed)".to_string()];
                options.extend(completions);
                if let Some(pick) = prompt_opt(Select::new("Complete:", options).prompt())? {
                    if pick != "(keep as typed)" {
                        let (text, _) = insert_completion(&caption, caption.len(), &pick);
                        caption = text;
                    }
                }
            }
        }

        if let Err(e) = session.dispatch(DraftAction::SetCaption(caption)).await {
            print_validation(&e);
        }
        Ok(())
    }

    async fn user_tagger(
        &self,
        session: &ComposeSession,
        draft: &CompositionDraft,
    ) -> Result<(), GatewayError> {
        if !draft.tagged_users.is_empty() {
            println!(
                "  Tagged: {}",
                draft
                    .tagged_users
                    .iter()
                    .map(|u| u.username.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            let menu = vec!["Add tags", "Remove a tag", "Back"];
            match prompt_opt(Select::new("Tag people", menu).prompt())? {
                Some("Remove a tag") => {
                    let names: Vec<String> = draft
                        .tagged_users
                        .iter()
                        .map(|u| u.username.clone())
                        .collect();
                    if let Some(name) = prompt_opt(Select::new("Untag:", names).prompt())? {
                        if let Some(user) = draft.tagged_users.iter().find(|u| u.username == name) {
                            let _ = session.dispatch(DraftAction::UntagUser(user.id)).await;
                        }
                    }
                    return Ok(());
                }
                Some("Add tags") => {}
                _ => return Ok(()),
            }
        }

        let Some(query) = prompt_opt(Text::new("Search people:").prompt())? else {
            return Ok(());
        };
        let users = self.directory.search_users(&query).await?;
        if users.is_empty() {
            println!("  No users found for \"{query}\".");
            return Ok(());
        }
        let labels: Vec<String> = users
            .iter()
            .map(|u| format!("{} — {}", u.username, u.display_name))
            .collect();
        let Some(chosen) = prompt_opt(MultiSelect::new("Tag:", labels.clone()).prompt())? else {
            return Ok(());
        };
        for label in chosen {
            if let Some(i) = labels.iter().position(|l| *l == label) {
                if let Err(e) = session.dispatch(DraftAction::TagUser(users[i].clone())).await {
                    print_validation(&e);
                }
            }
        }
        Ok(())
    }

    async fn location_tagger(
        &self,
        session: &ComposeSession,
        draft: &CompositionDraft,
    ) -> Result<(), GatewayError> {
        if let Some(loc) = &draft.location {
            println!("  Current location: {}", loc.name);
            let menu = vec!["Change", "Remove", "Back"];
            match prompt_opt(Select::new("Location", menu).prompt())? {
                Some("Remove") => {
                    let _ = session.dispatch(DraftAction::ClearLocation).await;
                    return Ok(());
                }
                Some("Change") => {}
                _ => return Ok(()),
            }
        }
        let Some(query) = prompt_opt(Text::new("Search places:").prompt())? else {
            return Ok(());
        };
        let places = self.directory.search_locations(&query).await?;
        if places.is_empty() {
            println!("  No places found for \"{query}\".");
            return Ok(());
        }
        let labels: Vec<String> = places
            .iter()
            .map(|p| format!("{} — {}", p.name, p.address))
            .collect();
        if let Some(label) = prompt_opt(Select::new("Place:", labels.clone()).prompt())? {
            if let Some(i) = labels.iter().position(|l| *l == label) {
                if let Err(e) = session
                    .dispatch(DraftAction::SetLocation(places[i].clone()))
                    .await
                {
                    print_validation(&e);
                }
            }
        }
        Ok(())
    }

    async fn privacy_editor(
        &self,
        session: &ComposeSession,
        draft: &CompositionDraft,
    ) -> Result<(), GatewayError> {
        match &draft.privacy {
            PrivacyConfig::Post(_) => {
                let options = vec![
                    "Public — Anyone can see this",
                    "Followers — Only people who follow you",
                    "Close Friends — Only your close friends",
                    "Only Me — Only you can see this",
                ];
                if let Some(pick) = prompt_opt(Select::new("Who can see this?", options).prompt())? {
                    let visibility = match pick.chars().next() {
                        Some('F') => PostVisibility::Followers,
                        Some('C') => PostVisibility::CloseFriends,
                        Some('O') => PostVisibility::Private,
                        _ => PostVisibility::Public,
                    };
                    if let Err(e) = session
                        .dispatch(DraftAction::SetPostVisibility(visibility))
                        .await
                    {
                        print_validation(&e);
                    }
                }
            }
            PrivacyConfig::Story(_) => {
                let options = vec![
                    "All Followers — Share with all your followers",
                    "Close Friends — Share with close friends only",
                    "Custom — Choose specific people",
                ];
                if let Some(pick) = prompt_opt(Select::new("Story privacy", options).prompt())? {
                    let visibility = match pick.chars().next() {
                        Some('C') if pick.starts_with("Close") => StoryVisibility::CloseFriends,
                        Some('C') => StoryVisibility::Custom,
                        _ => StoryVisibility::AllFollowers,
                    };
                    if let Err(e) = session
                        .dispatch(DraftAction::SetStoryVisibility(visibility))
                        .await
                    {
                        print_validation(&e);
                    }
                }
            }
        }
        self.toggle_editor(session).await
    }

    async fn toggle_editor(&self, session: &ComposeSession) -> Result<(), GatewayError> {
        loop {
            let draft = match session.draft().await {
                Ok(d) => d,
                Err(_) => return Ok(()),
            };
            let mut rows: Vec<(String, PrivacyToggle, bool)> = Vec::new();
            match &draft.privacy {
                PrivacyConfig::Post(p) => {
                    rows.push(("Allow comments".into(), PrivacyToggle::AllowComments, p.allow_comments));
                    rows.push(("Allow sharing".into(), PrivacyToggle::AllowSharing, p.allow_sharing));
                    rows.push(("Show like count".into(), PrivacyToggle::ShowLikeCount, p.show_like_count));
                    rows.push(("Hide from explore".into(), PrivacyToggle::HideFromExplore, p.hide_from_explore));
                }
                PrivacyConfig::Story(s) => {
                    rows.push(("Allow story replies".into(), PrivacyToggle::AllowReplies, s.allow_replies));
                    rows.push(("Allow story sharing".into(), PrivacyToggle::AllowStorySharing, s.allow_story_sharing));
                }
            }
            let mut labels: Vec<String> = rows
                .iter()
                .map(|(name, _, on)| format!("[{}] {name}", if *on { "x" } else { " " }))
                .collect();
            labels.push("Done".to_string());
            let Some(pick) = prompt_opt(Select::new("Advanced settings", labels.clone()).prompt())?
            else {
                return Ok(());
            };
            if pick == "Done" {
                return Ok(());
            }
            if let Some(i) = labels.iter().position(|l| *l == pick) {
                let (_, toggle, on) = rows[i].clone();
                if let Err(e) = session
                    .dispatch(DraftAction::SetPrivacyToggle(toggle, !on))
                    .await
                {
                    print_validation(&e);
                }
            }
        }
    }

    async fn schedule_editor(
        &self,
        session: &ComposeSession,
        draft: &CompositionDraft,
    ) -> Result<(), GatewayError> {
        if draft.upload_type == UploadType::Story {
            println!("  Stories cannot be scheduled and will be posted immediately.");
            return Ok(());
        }
        if draft.schedule.enabled {
            let menu = vec!["Change schedule", "Post immediately instead", "Back"];
            match prompt_opt(Select::new("Schedule", menu).prompt())? {
                Some("Post immediately instead") => {
                    let _ = session.dispatch(DraftAction::DisableSchedule).await;
                    return Ok(());
                }
                Some("Change schedule") => {}
                _ => return Ok(()),
            }
        } else {
            let Some(enable) = prompt_opt(
                Confirm::new("Schedule this for later?")
                    .with_default(false)
                    .prompt(),
            )?
            else {
                return Ok(());
            };
            if !enable {
                return Ok(());
            }
        }

        let Some(date) = prompt_opt(DateSelect::new("Date:").prompt())? else {
            return Ok(());
        };
        let Some(raw_time) = prompt_opt(Text::new("Time (HH:MM):").with_default("09:00").prompt())?
        else {
            return Ok(());
        };
        let Ok(time) = NaiveTime::parse_from_str(raw_time.trim(), "%H:%M") else {
            println!("  ! could not parse \"{raw_time}\" as HH:MM");
            return Ok(());
        };
        let tz_labels: Vec<&str> = Timezone::ALL.iter().map(|t| t.label()).collect();
        let Some(tz_label) = prompt_opt(Select::new("Timezone:", tz_labels).prompt())? else {
            return Ok(());
        };
        let timezone = Timezone::ALL
            .into_iter()
            .find(|t| t.label() == tz_label)
            .unwrap_or(Timezone::Eastern);

        if let Err(e) = session
            .dispatch(DraftAction::EnableSchedule {
                date,
                time,
                timezone,
            })
            .await
        {
            print_validation(&e);
        }
        Ok(())
    }

    async fn publish_step(&self, session: &ComposeSession) -> Result<Flow, GatewayError> {
        let draft = match session.draft().await {
            Ok(d) => d,
            Err(_) => return Ok(Flow::Abandon),
        };
        print_summary(&draft);

        let ready = session.can_publish_now().await.unwrap_or(false);
        let publish_label = publish_label(&draft);
        let mut menu = Vec::new();
        if ready {
            menu.push(publish_label);
        } else {
            println!("  ! This {} isn't ready to publish yet.", draft.upload_type);
        }
        if draft.upload_type != UploadType::Story && !draft.media.is_empty() {
            menu.push("Save draft");
        }
        menu.push("Back to details");
        menu.push("Quit");

        let Some(choice) = prompt_opt(Select::new("Publish", menu).prompt())? else {
            return Ok(Flow::Abandon);
        };
        match choice {
            "Back to details" => {
                let _ = session.retreat().await;
                Ok(Flow::Continue)
            }
            "Quit" => Ok(Flow::Abandon),
            "Save draft" => {
                let progress = PublishProgress::start();
                match session.save_draft().await {
                    Ok(saved) => {
                        let message = saved.status_message();
                        progress.finish(&message);
                        Ok(Flow::Done(message))
                    }
                    Err(e) => {
                        progress.abandon();
                        warn!(error = %e, "draft save failed");
                        println!("  ! {e}");
                        Ok(Flow::Continue)
                    }
                }
            }
            _ => {
                let progress = PublishProgress::start();
                match session.publish().await {
                    Ok(published) => {
                        let message = published.status_message();
                        progress.finish(&message);
                        Ok(Flow::Done(message))
                    }
                    Err(e) => {
                        progress.abandon();
                        warn!(error = %e, "publish failed");
                        println!("  ! {e}");
                        Ok(Flow::Continue)
                    }
                }
            }
        }
    }
}

fn publish_label(draft: &CompositionDraft) -> &'static str {
    if draft.schedule.enabled {
        return "Schedule Post";
    }
    match draft.upload_type {
        UploadType::Story => "Share to Story",
        UploadType::Reel => "Share Reel",
        UploadType::Post => "Share Post",
    }
}

fn print_summary(draft: &CompositionDraft) {
    println!("  ── Final preview ──");
    println!(
        "  {} · {} file(s) · {:.1} MB",
        draft.upload_type,
        draft.media.len(),
        draft.total_media_bytes() as f64 / (1024.0 * 1024.0)
    );
    if !draft.caption.is_empty() {
        let preview: String = draft.caption.chars().take(60).collect();
        println!("  Caption: {preview}");
    }
    if let Some(loc) = &draft.location {
        println!("  Location: {}", loc.name);
    }
    if !draft.tagged_users.is_empty() {
        println!("  {} tagged", draft.tagged_users.len());
    }
    println!("  Visibility: {}", draft.privacy.visibility_label());
    if draft.schedule.enabled {
        if let (Some(date), Some(time)) = (draft.schedule.date, draft.schedule.time) {
            println!("  Scheduled: {date} {time} ({})", draft.schedule.timezone);
        }
    }
}

#[async_trait]
impl InputPort for ConsoleInput {
    async fn run_compose(&self) -> Result<Option<String>, GatewayError> {
        let Some(upload_type) = self.prompt_upload_type()? else {
            return Ok(None);
        };
        let session = ComposeSession::new(
            upload_type,
            Arc::clone(&self.publisher),
            self.publish_timeout,
        );

        loop {
            let Ok(step) = session.current_step().await else {
                return Ok(None);
            };
            let flow = match step {
                WorkflowStep::Upload => self.upload_step(&session).await?,
                WorkflowStep::Edit => self.edit_step(&session).await?,
                WorkflowStep::Details => self.details_step(&session).await?,
                WorkflowStep::Publish => self.publish_step(&session).await?,
            };
            match flow {
                Flow::Continue => {}
                Flow::Abandon => return Ok(None),
                Flow::Done(message) => return Ok(Some(message)),
            }
        }
    }
}
