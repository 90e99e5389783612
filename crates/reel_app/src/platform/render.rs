use reel_core::AppViewModel;

const BAR_WIDTH: usize = 20;

/// One terminal status line for the current view, or `None` when idle.
pub fn status_line(view: &AppViewModel) -> Option<String> {
    if view.is_generating_audio {
        return Some(format!("Synthesizing narration ({} chars)...", view.script_chars));
    }
    if !view.is_generating {
        return None;
    }

    let job = view
        .current_job
        .as_ref()
        .map(|id| id.to_string())
        .unwrap_or_else(|| "submitting".to_string());
    let remaining = if view.timed_out {
        "timed out".to_string()
    } else {
        format!("~{} left", view.time_display)
    };
    Some(format!(
        "[{}] {:>3}% | job {} | {}",
        progress_bar(view.progress),
        view.progress,
        job,
        remaining
    ))
}

fn progress_bar(progress: u8) -> String {
    let filled = usize::from(progress.min(100)) * BAR_WIDTH / 100;
    format!("{}{}", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

#[cfg(test)]
mod tests {
    use reel_core::JobId;

    use super::*;

    #[test]
    fn idle_view_renders_nothing() {
        assert_eq!(status_line(&AppViewModel::default()), None);
    }

    #[test]
    fn generation_line_shows_progress_job_and_countdown() {
        let view = AppViewModel {
            is_generating: true,
            progress: 50,
            current_job: Some(JobId::new("job-9")),
            time_display: "0:12".to_string(),
            ..AppViewModel::default()
        };
        assert_eq!(
            status_line(&view).unwrap(),
            "[##########----------]  50% | job job-9 | ~0:12 left"
        );
    }

    #[test]
    fn timed_out_replaces_countdown() {
        let view = AppViewModel {
            is_generating: true,
            timed_out: true,
            time_display: "0:00".to_string(),
            ..AppViewModel::default()
        };
        let line = status_line(&view).unwrap();
        assert!(line.ends_with("job submitting | timed out"), "{line}");
    }
}
