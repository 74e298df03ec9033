mod commit_without_staged_files_is_reported;
mod write_commit_objects_for_nested_project;
