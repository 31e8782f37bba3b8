use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

use arm_swing_core::ArmSwingError;

/// Common interface for FFI error types.
///
/// - `code()` - Returns the error code to be passed across FFI boundary
/// - `msg()` - Returns the error message for diagnostic purposes
pub(crate) trait ArmSwingFfiError {
    /// Returns the error code to be returned across the FFI boundary.
    fn code(&self) -> ArmSwingErrorCode;

    /// Returns the human-readable error message.
    fn msg(&self) -> &str;
}

/// Default implementation of `ArmSwingFfiError` for the FFI error scenarios.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultArmSwingError {
    code: ArmSwingErrorCode,
    msg: String,
}

impl DefaultArmSwingError {
    /// Create error for null pointer passed where non-null required.
    ///
    /// # Arguments
    /// * `param_name` - The name of the parameter that was null (e.g., `"out_instance"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: ArmSwingErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Create error for poisoned lock.
    pub fn lock_poisoned(lock_name: &str) -> Self {
        Self {
            code: ArmSwingErrorCode::LockPoisoned,
            msg: format!("Lock '{lock_name}' was poisoned by a panic in another thread"),
        }
    }

    /// Create error for a non-finite scalar parameter.
    ///
    /// # Arguments
    /// * `param_name` - The name of the invalid parameter (e.g., `"dt"`)
    /// * `value` - The invalid value
    pub fn non_finite_parameter(param_name: &str, value: f32) -> Self {
        Self {
            code: ArmSwingErrorCode::InvalidParameter,
            msg: format!("Parameter '{param_name}' must be finite, got {value}"),
        }
    }
}

impl From<ArmSwingError> for DefaultArmSwingError {
    fn from(error: ArmSwingError) -> Self {
        let code = match error {
            ArmSwingError::InvalidConfig { .. }
            | ArmSwingError::ConfigParse(_)
            | ArmSwingError::ConfigRead { .. } => ArmSwingErrorCode::InvalidConfig,
            // The C surface drives the sampler directly and never binds a rig,
            // so this only covers core errors forwarded by future entry points.
            ArmSwingError::MissingReferences(_) => ArmSwingErrorCode::InvalidParameter,
        };
        Self {
            code,
            msg: error.to_string(),
        }
    }
}

impl ArmSwingFfiError for DefaultArmSwingError {
    fn code(&self) -> ArmSwingErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

/// FFI error codes returned by arm-swing functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArmSwingErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Invalid pointer: null pointer passed where non-null required.
    NullPointer = 1,

    /// Lock poisoned: internal synchronization primitive was poisoned by a panic.
    LockPoisoned = 2,

    /// Configuration rejected: speed, damping and threshold must be finite and
    /// non-negative, gravity finite, up axis finite and non-zero.
    InvalidConfig = 3,

    /// Invalid parameter passed to function.
    InvalidParameter = 4,
}

impl From<DefaultArmSwingError> for ArmSwingErrorCode {
    fn from(error: DefaultArmSwingError) -> Self {
        error.code
    }
}

thread_local! {
    /// Thread-local storage for the most recent FFI error (C string, error code).
    static LAST_ERROR: RefCell<(Option<CString>, ArmSwingErrorCode)> = const { RefCell::new((None, ArmSwingErrorCode::Ok)) };
}

/// Internal helper to read `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, ArmSwingErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

/// Internal helper to mutate `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, ArmSwingErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns:
/// - A borrowed pointer to the error message if an error occurred.
/// - `null` if no error has occurred or the message cannot be converted to a C string.
///
/// # Thread Safety
/// Error messages are stored per-thread (thread-local storage).
///
/// # Lifetime
/// The returned pointer is valid until the next FFI call on this thread that
/// sets or clears the error, or until the thread terminates.
///
/// **DO NOT FREE THIS POINTER** - it is managed internally.
///
/// Example:
/// ```cpp
/// ArmSwingInstance* swing = nullptr;
/// ArmSwingErrorCode err = arm_swing_new(config, left, right, &swing);
/// if (err != ArmSwingErrorCode::Ok) {
///     const char* error = arm_swing_get_last_error();
///     if (error) {
///         printf("Arm swing creation failed: %s\n", error);
///     }
/// }
/// ```
#[no_mangle]
pub extern "C" fn arm_swing_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code.
///
/// Returns `ArmSwingErrorCode::Ok` (0) if the last call on this thread succeeded.
#[no_mangle]
pub extern "C" fn arm_swing_get_last_error_code() -> ArmSwingErrorCode {
    with_last_error(|(_cstring, code)| *code)
}
