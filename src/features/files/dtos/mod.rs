mod file_dto;

pub use file_dto::{
    FileCategory, FileListResponseDto, FileMetadataDto, FileResponseDto, FileStatsDto,
    FileStatsEntryDto, FileType, ListFilesQuery, SearchFilesQuery, SortBy, SortOrder,
    UpdateFileDto, UploadFileDto, ViewCountDto,
};
