use arm_swing_core::{ArmSwingConfig, ArmSwingSampler, FrameInput};
use std::ptr;
use std::sync::Mutex;

use crate::error::{ArmSwingErrorCode, DefaultArmSwingError};
use crate::helpers::{clear_last_error, track_error, track_result};
use crate::types::{ArmSwingCommands, ArmSwingConfigFFI, ArmSwingFrame, ArmSwingVec3};

/// Arm-swing locomotion state for one player rig.
///
/// The host samples its rig every frame, passes the values to
/// `arm_swing_update`, and applies the returned displacements to its own
/// character controller.
///
/// # Thread Safety
/// The sampler is protected by a `Mutex`, so calls may come from any engine
/// thread. Updates are expected once per frame.
///
/// # Usage in Game Engines
///
/// ## Unreal Engine Example
/// ```cpp
/// ArmSwingInstance* SwingPtr = nullptr;
///
/// void AVRPawn::BeginPlay() {
///     ArmSwingConfigFFI Config = arm_swing_default_config();
///     ArmSwingErrorCode Err = arm_swing_new(Config, LeftPos(), RightPos(), &SwingPtr);
///     if (Err != ArmSwingErrorCode::Ok) {
///         UE_LOG(LogTemp, Error, TEXT("%hs"), arm_swing_get_last_error());
///     }
/// }
///
/// void AVRPawn::Tick(float DeltaTime) {
///     ArmSwingFrame Frame = SampleRig();
///     ArmSwingCommands Commands;
///     if (arm_swing_update(SwingPtr, DeltaTime, &Frame, &Commands) == ArmSwingErrorCode::Ok) {
///         if (Commands.has_locomotion) {
///             Move(Commands.locomotion);
///         }
///         Move(Commands.gravity);
///     }
/// }
///
/// void AVRPawn::EndPlay(const EEndPlayReason::Type EndPlayReason) {
///     arm_swing_destroy(SwingPtr);
///     SwingPtr = nullptr;
/// }
/// ```
pub struct ArmSwingInstance {
    pub(crate) sampler: Mutex<ArmSwingSampler>,
}

impl ArmSwingInstance {
    /// Validate the configuration and seed the sampler with the initial hand positions.
    ///
    /// # Errors
    ///
    /// Returns `ArmSwingErrorCode::InvalidConfig` if the configuration fails validation.
    pub(crate) fn new(
        config: ArmSwingConfigFFI,
        left_hand: ArmSwingVec3,
        right_hand: ArmSwingVec3,
    ) -> Result<Box<Self>, DefaultArmSwingError> {
        let config = ArmSwingConfig::from(config);
        config.validate()?;

        Ok(Box::new(Self {
            sampler: Mutex::new(ArmSwingSampler::new(
                config,
                left_hand.into(),
                right_hand.into(),
            )),
        }))
    }

    fn with_sampler<T>(
        &self,
        func: impl FnOnce(&mut ArmSwingSampler) -> T,
    ) -> Result<T, DefaultArmSwingError> {
        let mut sampler = self
            .sampler
            .lock()
            .map_err(|_| DefaultArmSwingError::lock_poisoned("sampler"))?;
        Ok(func(&mut sampler))
    }
}

/// Default configuration: speed 5, gravity (0, -9.81, 0), damping 0.8,
/// swing threshold 0.05, up +Y.
#[no_mangle]
pub extern "C" fn arm_swing_default_config() -> ArmSwingConfigFFI {
    ArmSwingConfig::default().into()
}

/// Create a new arm-swing instance and return it via out-parameter.
///
/// Returns
/// - `ArmSwingErrorCode::Ok` (0) — success, `out_instance` contains a valid pointer
/// - `ArmSwingErrorCode::NullPointer` — `out_instance` is null
/// - `ArmSwingErrorCode::InvalidConfig` — a configuration value was rejected
///
/// On failure `out_instance` is set to null; call `arm_swing_get_last_error()`
/// for a description.
///
/// # Safety
///
/// - `out_instance` must be a valid, non-null pointer to writable memory.
/// - The caller takes ownership of the returned instance and MUST call
///   `arm_swing_destroy` exactly once.
#[no_mangle]
pub unsafe extern "C" fn arm_swing_new(
    config: ArmSwingConfigFFI,
    left_hand: ArmSwingVec3,
    right_hand: ArmSwingVec3,
    out_instance: *mut *mut ArmSwingInstance,
) -> ArmSwingErrorCode {
    if out_instance.is_null() {
        return track_error(&DefaultArmSwingError::null_pointer("out_instance"));
    }

    match track_result(ArmSwingInstance::new(config, left_hand, right_hand)) {
        Ok(instance) => {
            unsafe {
                *out_instance = Box::into_raw(instance);
            }
            ArmSwingErrorCode::Ok
        }
        Err(code) => {
            unsafe {
                *out_instance = ptr::null_mut();
            }
            code
        }
    }
}

/// Advance one frame and write the displacements to apply into `out_commands`.
///
/// Returns
/// - `ArmSwingErrorCode::Ok` (0) — `out_commands` populated
/// - `ArmSwingErrorCode::NullPointer` — `instance`, `frame` or `out_commands` is null
/// - `ArmSwingErrorCode::InvalidParameter` — `dt` is not finite
/// - `ArmSwingErrorCode::LockPoisoned` — a previous call panicked while holding the sampler
///
/// # Safety
///
/// - `instance` must come from `arm_swing_new` and not have been destroyed.
/// - `frame` must point to a readable `ArmSwingFrame`.
/// - `out_commands` must point to writable memory for an `ArmSwingCommands`.
#[no_mangle]
pub unsafe extern "C" fn arm_swing_update(
    instance: *const ArmSwingInstance,
    dt: f32,
    frame: *const ArmSwingFrame,
    out_commands: *mut ArmSwingCommands,
) -> ArmSwingErrorCode {
    if instance.is_null() {
        return track_error(&DefaultArmSwingError::null_pointer("instance"));
    }
    if frame.is_null() {
        return track_error(&DefaultArmSwingError::null_pointer("frame"));
    }
    if out_commands.is_null() {
        return track_error(&DefaultArmSwingError::null_pointer("out_commands"));
    }
    if !dt.is_finite() {
        return track_error(&DefaultArmSwingError::non_finite_parameter("dt", dt));
    }

    // SAFETY: pointers checked non-null above; validity is the caller's contract.
    let (instance, input) = unsafe { (&*instance, FrameInput::from(*frame)) };

    match track_result(instance.with_sampler(|sampler| sampler.step(&input, dt))) {
        Ok(report) => {
            unsafe {
                *out_commands = report.into();
            }
            ArmSwingErrorCode::Ok
        }
        Err(code) => code,
    }
}

/// Re-seed the hand samples without moving, e.g. after a teleport.
///
/// # Safety
///
/// `instance` must come from `arm_swing_new` and not have been destroyed.
#[no_mangle]
pub unsafe extern "C" fn arm_swing_resync(
    instance: *const ArmSwingInstance,
    left_hand: ArmSwingVec3,
    right_hand: ArmSwingVec3,
) -> ArmSwingErrorCode {
    if instance.is_null() {
        return track_error(&DefaultArmSwingError::null_pointer("instance"));
    }

    // SAFETY: checked non-null above; validity is the caller's contract.
    let instance = unsafe { &*instance };
    match track_result(
        instance.with_sampler(|sampler| sampler.resync(left_hand.into(), right_hand.into())),
    ) {
        Ok(()) => ArmSwingErrorCode::Ok,
        Err(code) => code,
    }
}

/// Destroys an instance previously created by `arm_swing_new`.
///
/// If `ptr` is null this is a no-op.
///
/// # Safety
/// - The pointer MUST have been created by `arm_swing_new`.
/// - The pointer MUST NOT have been freed already.
/// - After calling this function, the caller must not use the pointer again.
#[no_mangle]
pub unsafe extern "C" fn arm_swing_destroy(ptr: *mut ArmSwingInstance) {
    if ptr.is_null() {
        return;
    }

    // SAFETY: created by `Box::into_raw` in `arm_swing_new` and not yet freed.
    unsafe {
        drop(Box::from_raw(ptr));
    }
    clear_last_error();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{arm_swing_get_last_error, arm_swing_get_last_error_code};
    use std::ffi::CStr;

    fn frame(left_x: f32, grip: f32) -> ArmSwingFrame {
        ArmSwingFrame {
            left_hand: ArmSwingVec3 {
                x: left_x,
                y: 1.0,
                z: 0.0,
            },
            right_hand: ArmSwingVec3::default(),
            head_forward: ArmSwingVec3 {
                x: 0.0,
                y: 0.0,
                z: 1.0,
            },
            left_grip: grip,
            right_grip: 1.0,
        }
    }

    fn create() -> *mut ArmSwingInstance {
        let mut instance: *mut ArmSwingInstance = ptr::null_mut();
        let left = ArmSwingVec3 {
            x: 0.0,
            y: 1.0,
            z: 0.0,
        };
        let code = unsafe {
            arm_swing_new(
                arm_swing_default_config(),
                left,
                ArmSwingVec3::default(),
                &mut instance,
            )
        };
        assert_eq!(code, ArmSwingErrorCode::Ok);
        assert!(!instance.is_null());
        instance
    }

    #[test]
    fn test_new_rejects_null_out_pointer() {
        let code = unsafe {
            arm_swing_new(
                arm_swing_default_config(),
                ArmSwingVec3::default(),
                ArmSwingVec3::default(),
                ptr::null_mut(),
            )
        };
        assert_eq!(code, ArmSwingErrorCode::NullPointer);
        assert_eq!(arm_swing_get_last_error_code(), ArmSwingErrorCode::NullPointer);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = arm_swing_default_config();
        config.damping = f32::NAN;
        let mut instance: *mut ArmSwingInstance = ptr::null_mut();
        let code = unsafe {
            arm_swing_new(
                config,
                ArmSwingVec3::default(),
                ArmSwingVec3::default(),
                &mut instance,
            )
        };
        assert_eq!(code, ArmSwingErrorCode::InvalidConfig);
        assert!(instance.is_null());

        let message = arm_swing_get_last_error();
        assert!(!message.is_null());
        let message = unsafe { CStr::from_ptr(message) }.to_str().unwrap();
        assert!(message.contains("damping"), "{message}");
    }

    #[test]
    fn test_update_reports_locomotion_and_gravity() {
        let instance = create();
        let mut commands = ArmSwingCommands::default();

        let code = unsafe { arm_swing_update(instance, 0.5, &frame(1.0, 1.0), &mut commands) };
        assert_eq!(code, ArmSwingErrorCode::Ok);
        assert!(commands.grips_engaged);
        assert!(commands.has_locomotion);
        assert_eq!(commands.locomotion.z, 2.5);
        assert_eq!(commands.gravity.y, -4.905);

        // Released grip: gravity only.
        let code = unsafe { arm_swing_update(instance, 0.5, &frame(2.0, 0.0), &mut commands) };
        assert_eq!(code, ArmSwingErrorCode::Ok);
        assert!(!commands.has_locomotion);
        assert_eq!(commands.locomotion, ArmSwingVec3::default());
        assert_eq!(commands.gravity.y, -4.905);

        unsafe { arm_swing_destroy(instance) };
    }

    #[test]
    fn test_update_rejects_non_finite_dt() {
        let instance = create();
        let mut commands = ArmSwingCommands::default();

        let code =
            unsafe { arm_swing_update(instance, f32::NAN, &frame(1.0, 1.0), &mut commands) };
        assert_eq!(code, ArmSwingErrorCode::InvalidParameter);

        unsafe { arm_swing_destroy(instance) };
    }

    #[test]
    fn test_resync_suppresses_swing() {
        let instance = create();
        let mut commands = ArmSwingCommands::default();

        let teleported = ArmSwingVec3 {
            x: 40.0,
            y: 1.0,
            z: 0.0,
        };
        let code = unsafe { arm_swing_resync(instance, teleported, ArmSwingVec3::default()) };
        assert_eq!(code, ArmSwingErrorCode::Ok);

        let code = unsafe { arm_swing_update(instance, 0.1, &frame(40.0, 1.0), &mut commands) };
        assert_eq!(code, ArmSwingErrorCode::Ok);
        assert_eq!(commands.swing_speed, 0.0);
        assert!(!commands.has_locomotion);

        unsafe { arm_swing_destroy(instance) };
    }

    #[test]
    fn test_null_instance_is_rejected() {
        let mut commands = ArmSwingCommands::default();
        let code =
            unsafe { arm_swing_update(ptr::null(), 0.1, &frame(0.0, 1.0), &mut commands) };
        assert_eq!(code, ArmSwingErrorCode::NullPointer);

        let code = unsafe {
            arm_swing_resync(ptr::null(), ArmSwingVec3::default(), ArmSwingVec3::default())
        };
        assert_eq!(code, ArmSwingErrorCode::NullPointer);
        assert_eq!(arm_swing_get_last_error_code(), ArmSwingErrorCode::NullPointer);

        unsafe { arm_swing_destroy(ptr::null_mut()) };
    }
}
