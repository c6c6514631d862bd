mod log_file_history_of_directory;
mod log_file_history_of_single_file;
mod log_file_history_unknown_path;
mod log_file_history_with_follow;
mod log_multiple_branches_with_timestamp_ordering;
mod log_stops_at_shallow_boundary;
mod log_with_identical_timestamps_maintains_stable_order;
mod log_with_max_count;
mod show_commit_with_decoration;
mod show_log_from_revision;
mod show_log_with_no_commits;
