use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;

use crate::keys;
use crate::modifiers::{Modifier, ModifierSet};

#[derive(Debug, Error)]
pub enum CaptureError {
    /// Hook registration failed; the session runs without capture.
    #[error("low-level keyboard hook unavailable: {0}")]
    HookUnavailable(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Down,
    Up,
}

/// One physical key transition as delivered by the system hook.
#[derive(Debug, Clone, Copy)]
pub struct KeyEvent {
    pub vk: u32,
    pub transition: Transition,
    pub at: Instant,
}

/// A formatted keystroke label, stamped with the hook observation time.
///
/// The timestamp travels with the label so the dedup window on the UI side
/// measures from when the key was seen, not from when the queue drained.
/// `echo` is the pressed key's dedup character (`Some('A')` for a plain or
/// modified letter, `None` for glyph keys), precomputed here because the
/// label alone does not round-trip back to the key name.
#[derive(Debug, Clone)]
pub struct Combo {
    pub label: String,
    pub echo: Option<char>,
    pub at: Instant,
}

pub type WakeFn = Arc<dyn Fn() + Send + Sync>;

/// Per-event pipeline run on the hook context: modifier tracking, combo
/// formatting, and a non-blocking post to the display mailbox.
pub struct CaptureState {
    modifiers: ModifierSet,
    sink: Sender<Combo>,
    wake: Option<WakeFn>,
}

impl CaptureState {
    pub fn new(sink: Sender<Combo>) -> Self {
        Self {
            modifiers: ModifierSet::new(),
            sink,
            wake: None,
        }
    }

    /// Attach a callback invoked after each successful mailbox post, used to
    /// nudge the UI event loop awake.
    pub fn with_wake(sink: Sender<Combo>, wake: WakeFn) -> Self {
        Self {
            modifiers: ModifierSet::new(),
            sink,
            wake: Some(wake),
        }
    }

    /// Handle one hook event. The return value is the "consumed" flag for
    /// the hook chain and is always `false`: the visualizer is a pure
    /// observer, and swallowing an event would break typing system-wide.
    ///
    /// Every branch returns promptly and without panicking; a dropped
    /// mailbox receiver just means the overlay is gone and the event label
    /// is discarded.
    pub fn dispatch(&mut self, event: &KeyEvent) -> bool {
        let raw = keys::virtual_key_name(event.vk);
        let name = keys::display_name(&raw);
        match (event.transition, Modifier::from_name(&name)) {
            (Transition::Down, Some(modifier)) => self.modifiers.press(modifier),
            (Transition::Up, Some(modifier)) => self.modifiers.release(modifier),
            (Transition::Down, None) => {
                let label = keys::format_combo(&self.modifiers, &name);
                let echo = crate::dedup::echo_char(&name);
                log::trace!("combo: {label}");
                if self.sink.send(Combo { label, echo, at: event.at }).is_ok() {
                    if let Some(wake) = &self.wake {
                        wake();
                    }
                }
            }
            (Transition::Up, None) => {}
        }
        false
    }
}

/// Owner of the system-wide keyboard hook for the life of the process.
///
/// Single-instance discipline is the caller's job; `start` and `stop` are
/// individually idempotent and tearing down a hook that was never installed
/// is a no-op.
pub struct InputCaptureSession {
    #[cfg_attr(not(windows), allow(dead_code))]
    state: Option<CaptureState>,
    active: bool,
    #[cfg(windows)]
    backend: platform::HookBackend,
}

impl InputCaptureSession {
    pub fn new(state: CaptureState) -> Self {
        Self {
            state: Some(state),
            active: false,
            #[cfg(windows)]
            backend: platform::HookBackend::default(),
        }
    }

    /// Install the global hook. On hosts without one (or when registration
    /// fails) this reports `HookUnavailable` exactly once; the caller is
    /// expected to log it and continue without capture.
    pub fn start(&mut self) -> Result<(), CaptureError> {
        if self.active {
            return Ok(());
        }

        #[cfg(windows)]
        {
            let state = match self.state.take() {
                Some(state) => state,
                // A failed install consumed the state; there is nothing left
                // to register for this session.
                None => {
                    return Err(CaptureError::HookUnavailable(
                        "capture session has no state left to install".into(),
                    ))
                }
            };
            self.backend.install(state)?;
            self.active = true;
            log::info!("global keyboard hook installed");
            Ok(())
        }

        #[cfg(not(windows))]
        {
            Err(CaptureError::HookUnavailable(
                "system-wide keyboard hooks are only supported on Windows".into(),
            ))
        }
    }

    pub fn stop(&mut self) {
        if !self.active {
            return;
        }

        #[cfg(windows)]
        {
            self.state = self.backend.uninstall();
            log::info!("global keyboard hook removed");
        }

        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl Drop for InputCaptureSession {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(windows)]
mod platform {
    use super::{CaptureError, CaptureState, KeyEvent, Transition};
    use once_cell::sync::Lazy;
    use std::sync::Mutex;
    use std::thread::JoinHandle;
    use std::time::{Duration, Instant};
    use windows::Win32::Foundation::{LPARAM, LRESULT, WPARAM};

    static HOOK_STATE: Lazy<Mutex<Option<CaptureState>>> = Lazy::new(|| Mutex::new(None));

    #[derive(Default)]
    pub struct HookBackend {
        hook_thread: Option<HookThread>,
    }

    struct HookThread {
        thread_id: u32,
        join: JoinHandle<()>,
    }

    impl HookBackend {
        pub fn install(&mut self, state: CaptureState) -> Result<(), CaptureError> {
            if self.hook_thread.is_some() {
                return Ok(());
            }

            if let Ok(mut guard) = HOOK_STATE.lock() {
                *guard = Some(state);
            }

            use windows::Win32::System::LibraryLoader::GetModuleHandleW;
            use windows::Win32::System::Threading::GetCurrentThreadId;
            use windows::Win32::UI::WindowsAndMessaging::{
                DispatchMessageW, GetMessageW, PeekMessageW, SetWindowsHookExW,
                TranslateMessage, UnhookWindowsHookEx, MSG, PM_NOREMOVE, WH_KEYBOARD_LL,
            };

            let (ready_tx, ready_rx) =
                std::sync::mpsc::sync_channel::<Result<u32, CaptureError>>(1);

            let join = std::thread::spawn(move || {
                let mut msg = MSG::default();
                unsafe {
                    // Force-create the thread message queue before reporting
                    // readiness so WM_QUIT from uninstall cannot be lost.
                    let _ = PeekMessageW(&mut msg, None, 0, 0, PM_NOREMOVE);
                }

                let thread_id = unsafe { GetCurrentThreadId() };
                let hmodule = match unsafe { GetModuleHandleW(None) } {
                    Ok(h) => h,
                    Err(err) => {
                        let _ = ready_tx
                            .send(Err(CaptureError::HookUnavailable(err.to_string())));
                        return;
                    }
                };

                let keyboard_hook = match unsafe {
                    SetWindowsHookExW(WH_KEYBOARD_LL, Some(keyboard_hook_proc), hmodule, 0)
                } {
                    Ok(h) if !h.0.is_null() => h,
                    Ok(_) => {
                        let _ = ready_tx.send(Err(CaptureError::HookUnavailable(
                            windows::core::Error::from_win32().to_string(),
                        )));
                        return;
                    }
                    Err(err) => {
                        let _ = ready_tx
                            .send(Err(CaptureError::HookUnavailable(err.to_string())));
                        return;
                    }
                };

                let _ = ready_tx.send(Ok(thread_id));

                loop {
                    let r = unsafe { GetMessageW(&mut msg, None, 0, 0) };
                    if r.0 <= 0 {
                        break;
                    }
                    unsafe {
                        let _ = TranslateMessage(&msg);
                        DispatchMessageW(&msg);
                    }
                }

                unsafe {
                    let _ = UnhookWindowsHookEx(keyboard_hook);
                }
            });

            let thread_id = match ready_rx.recv_timeout(Duration::from_secs(2)) {
                Ok(Ok(id)) => id,
                Ok(Err(err)) => {
                    Self::take_state();
                    let _ = join.join();
                    return Err(err);
                }
                Err(_) => {
                    Self::take_state();
                    return Err(CaptureError::HookUnavailable(
                        "keyboard hook thread did not signal readiness".into(),
                    ));
                }
            };

            self.hook_thread = Some(HookThread { thread_id, join });
            Ok(())
        }

        /// Remove the hook and hand the capture state back so the session
        /// can be restarted. Safe to call when nothing is installed.
        pub fn uninstall(&mut self) -> Option<CaptureState> {
            let state = Self::take_state();

            if let Some(th) = self.hook_thread.take() {
                use windows::Win32::UI::WindowsAndMessaging::{PostThreadMessageW, WM_QUIT};
                unsafe {
                    let _ = PostThreadMessageW(th.thread_id, WM_QUIT, WPARAM(0), LPARAM(0));
                }
                let _ = th.join.join();
            }

            state
        }

        fn take_state() -> Option<CaptureState> {
            HOOK_STATE.lock().ok().and_then(|mut guard| guard.take())
        }
    }

    unsafe extern "system" fn keyboard_hook_proc(
        n_code: i32,
        w_param: WPARAM,
        l_param: LPARAM,
    ) -> LRESULT {
        use windows::Win32::UI::WindowsAndMessaging::{
            CallNextHookEx, HC_ACTION, HHOOK, KBDLLHOOKSTRUCT, WM_KEYDOWN, WM_KEYUP,
            WM_SYSKEYDOWN, WM_SYSKEYUP,
        };

        if n_code == HC_ACTION as i32 {
            let transition = match w_param.0 as u32 {
                WM_KEYDOWN | WM_SYSKEYDOWN => Some(Transition::Down),
                WM_KEYUP | WM_SYSKEYUP => Some(Transition::Up),
                _ => None,
            };

            if let Some(transition) = transition {
                let info = unsafe { &*(l_param.0 as *const KBDLLHOOKSTRUCT) };
                let event = KeyEvent {
                    vk: info.vkCode,
                    transition,
                    at: Instant::now(),
                };

                if let Ok(mut guard) = HOOK_STATE.lock() {
                    if let Some(state) = guard.as_mut() {
                        let _ = state.dispatch(&event);
                    }
                }
            }
        }

        // The event continues down the hook chain on every path, including
        // an empty or poisoned state slot.
        CallNextHookEx(
            HHOOK(std::ptr::null_mut()),
            n_code,
            w_param,
            l_param,
        )
    }
}
