use color_eyre::Result;
use log::info;
use reqwest::Url;
use reqwest::blocking::Client;
use slack_morphism::prelude::*;

use crate::diff::JobDiff;
use crate::job::JobRecord;

const EMOJI_NEW: &str = ":new:";
const EMOJI_CLOSED: &str = ":wastebasket:";
const EMOJI_LINK: &str = ":link:";

// Slack's maximum block limit per message
const SLACK_MAX_BLOCKS: usize = 50;

// Slack rejects header blocks with longer plain text
const SLACK_MAX_HEADER_CHARS: usize = 150;

/// Escapes text for Slack mrkdwn: `&`, `<` and `>` become entities and
/// formatting marks get a backslash.
fn escape_mrkdwn(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '_' | '*' | '~' | '`' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

fn header_text(emoji: &str, title: &str) -> String {
    let text = format!("{emoji} {title}");
    if text.chars().count() <= SLACK_MAX_HEADER_CHARS {
        return text;
    }
    let mut truncated: String = text.chars().take(SLACK_MAX_HEADER_CHARS - 1).collect();
    truncated.push('…');
    truncated
}

fn job_details(job: &JobRecord) -> String {
    format!(
        "*Department:* {}\n*Project:* {}\n*Location:* {}",
        escape_mrkdwn(&job.department),
        escape_mrkdwn(&job.project),
        escape_mrkdwn(&job.location)
    )
}

fn render_new_job(job: &JobRecord) -> Vec<SlackBlock> {
    vec![
        SlackHeaderBlock::new(pt!(header_text(EMOJI_NEW, &job.title))).into(),
        SlackSectionBlock::new()
            .with_text(md!(job_details(job)))
            .into(),
    ]
}

fn render_closed_job(job: &JobRecord) -> Vec<SlackBlock> {
    vec![
        SlackHeaderBlock::new(pt!(header_text(EMOJI_CLOSED, &job.title))).into(),
        SlackContextBlock::new(vec![SlackContextBlockElement::MarkDown(md!(format!(
            "No longer listed · {}",
            escape_mrkdwn(&job.location)
        )))])
        .into(),
    ]
}

fn render_careers_link(careers_url: &Url) -> Vec<SlackBlock> {
    vec![SlackContextBlock::new(vec![SlackContextBlockElement::MarkDown(md!(format!(
        "<{careers_url}|{EMOJI_LINK} open the careers page>"
    )))])
    .into()]
}

/// Packs per-job block groups into messages that stay under Slack's block
/// limit, with a divider between jobs and one block reserved at the end of
/// the last message for the careers link.
fn chunk_blocks(groups: Vec<Vec<SlackBlock>>) -> Vec<Vec<SlackBlock>> {
    let mut messages: Vec<Vec<SlackBlock>> = Vec::new();
    let mut current: Vec<SlackBlock> = Vec::new();

    for group in groups {
        let blocks_needed = if current.is_empty() {
            group.len()
        } else {
            group.len() + 1 // divider
        };

        if !current.is_empty() && current.len() + blocks_needed > SLACK_MAX_BLOCKS - 1 {
            messages.push(std::mem::take(&mut current));
        }

        if !current.is_empty() {
            current.push(SlackDividerBlock::new().into());
        }
        current.extend(group);
    }

    if !current.is_empty() {
        messages.push(current);
    }
    messages
}

pub fn summary_text(diff: &JobDiff) -> String {
    format!(
        "Careers page update: {} new, {} no longer listed",
        diff.new_jobs.len(),
        diff.closed_jobs.len()
    )
}

fn render_messages(diff: &JobDiff, careers_url: &Url) -> Vec<Vec<SlackBlock>> {
    let groups = diff
        .new_jobs
        .iter()
        .map(render_new_job)
        .chain(diff.closed_jobs.iter().map(render_closed_job))
        .collect();

    let mut messages = chunk_blocks(groups);
    if let Some(last) = messages.last_mut() {
        last.extend(render_careers_link(careers_url));
    }
    messages
}

pub fn send_webhook_notifications(
    client: &Client,
    webhook_url: &Url,
    careers_url: &Url,
    diff: &JobDiff,
) -> Result<()> {
    for job in &diff.new_jobs {
        info!("Sending notification for new job: {job}");
    }
    for job in &diff.closed_jobs {
        info!("Sending notification for closed job: {job}");
    }

    let summary = summary_text(diff);
    let messages = render_messages(diff, careers_url);

    for (i, blocks) in messages.iter().enumerate() {
        let text = if messages.len() == 1 {
            summary.clone()
        } else {
            format!("{} (part {}/{})", summary, i + 1, messages.len())
        };

        let payload = SlackMessageContent::new()
            .with_text(text)
            .with_blocks(blocks.clone());

        client
            .post(webhook_url.clone())
            .json(&payload)
            .send()?
            .error_for_status()?;
    }

    info!("Successfully sent webhook notifications");
    Ok(())
}
