use crate::error::SdkprepError;

pub fn get_exit_code(error: &SdkprepError) -> i32 {
    match error {
        SdkprepError::InvalidConfig(_)
        | SdkprepError::ConfigError(_)
        | SdkprepError::ValidationError(_) => 2,

        SdkprepError::PermissionDenied(_) => 13,

        SdkprepError::NetworkError(_) | SdkprepError::Http(_) | SdkprepError::Download(_) => 20,

        SdkprepError::CommandNotFound(_) => 127, // Standard "command not found" exit code

        _ => 1,
    }
}
