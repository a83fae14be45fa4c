mod auth_dto;

pub use auth_dto::{
    AuthResponseDto, ChangePasswordDto, LoginDto, RegisterDto, UpdateProfileDto, UserResponseDto,
};
