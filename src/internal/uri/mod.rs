pub(crate) mod utilities;
pub(crate) use utilities::combine;
pub(crate) use utilities::is_git_revision;
pub(crate) use utilities::normalize_remote_url;
pub(crate) use utilities::parse_authority;
pub(crate) use utilities::path_and_query;
pub(crate) use utilities::repository_relative_url;
pub(crate) use utilities::safe_unescape;
pub(crate) use utilities::split_path;
pub(crate) use utilities::url_authority;
pub(crate) use utilities::Authority;
