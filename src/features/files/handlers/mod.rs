pub mod file_handler;

pub use file_handler::{
    __path_delete_file, __path_file_stats, __path_get_file, __path_increment_view,
    __path_list_files, __path_search_files, __path_update_file, __path_upload_file, delete_file,
    file_stats, get_file, increment_view, list_files, search_files, update_file, upload_file,
};
