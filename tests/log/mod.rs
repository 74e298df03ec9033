mod show_log_with_no_commits;
mod show_multiple_commits_in_medium_format;
