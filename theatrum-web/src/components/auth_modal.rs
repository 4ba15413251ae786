//! Sign-in dialog: choice, log in, sign up, guest, verify and welcome panels.
use theatrum_core::auth::VERIFY_CODE;
use theatrum_core::{AuthError, AuthProgress, AuthService, AuthStep, Notice};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::modal::Modal;
use crate::dom;
use crate::storage::Stores;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub stores: Stores,
    pub on_close: Callback<()>,
    pub on_notice: Callback<Notice>,
    #[prop_or_default]
    pub initial_step: AuthStep,
}

#[derive(Clone, PartialEq, Eq, Default)]
struct Panel {
    step: AuthStep,
    /// Address awaiting the demo code.
    verify_email: String,
    welcome_name: String,
}

impl Panel {
    fn at(step: AuthStep) -> Self {
        Self {
            step,
            ..Self::default()
        }
    }

    fn after(progress: &AuthProgress) -> Self {
        match progress {
            AuthProgress::Verify { email } => Self {
                step: AuthStep::Verify,
                verify_email: email.clone(),
                welcome_name: String::new(),
            },
            AuthProgress::Welcome { name } => Self {
                step: AuthStep::Welcome,
                verify_email: String::new(),
                welcome_name: name.clone(),
            },
        }
    }
}

fn input_value(node: &NodeRef) -> String {
    node.cast::<HtmlInputElement>()
        .map(|input| input.value())
        .unwrap_or_default()
}

/// Move the panel to wherever an auth action leads and surface its notice.
fn apply_outcome(
    outcome: Result<AuthProgress, AuthError>,
    panel: &UseStateHandle<Panel>,
    on_notice: &Callback<Notice>,
) {
    match outcome {
        Ok(progress) => {
            if let Some(notice) = progress.notice() {
                on_notice.emit(notice);
            }
            panel.set(Panel::after(&progress));
        }
        Err(err) => {
            on_notice.emit(err.notice());
            if let Some(step) = err.redirect() {
                panel.set(Panel::at(step));
            }
        }
    }
}

fn step_title(step: AuthStep) -> &'static str {
    match step {
        AuthStep::Choice => "Welcome to Theatrum",
        AuthStep::Login => "Log In",
        AuthStep::Signup => "Create Account",
        AuthStep::Guest => "Continue as Guest",
        AuthStep::Verify => "Verify Your Email",
        AuthStep::Welcome => "You're all set",
    }
}

#[function_component(AuthModal)]
pub fn auth_modal(props: &Props) -> Html {
    let panel = use_state(|| Panel::at(props.initial_step));
    let login_email = use_node_ref();
    let login_password = use_node_ref();
    let signup_name = use_node_ref();
    let signup_email = use_node_ref();
    let signup_password = use_node_ref();
    let verify_code = use_node_ref();

    let go = |step: AuthStep| {
        let panel = panel.clone();
        Callback::from(move |_: MouseEvent| panel.set(Panel::at(step)))
    };

    let on_login = {
        let stores = props.stores.clone();
        let panel = panel.clone();
        let on_notice = props.on_notice.clone();
        let (email, password) = (login_email.clone(), login_password.clone());
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let auth = AuthService::new(stores.local.kv(), stores.session.kv());
            let outcome = auth.login(&input_value(&email), &input_value(&password), dom::now_ms());
            apply_outcome(outcome, &panel, &on_notice);
        })
    };
    let on_signup = {
        let stores = props.stores.clone();
        let panel = panel.clone();
        let on_notice = props.on_notice.clone();
        let (name, email, password) = (
            signup_name.clone(),
            signup_email.clone(),
            signup_password.clone(),
        );
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let auth = AuthService::new(stores.local.kv(), stores.session.kv());
            let outcome = auth.signup(
                &input_value(&name),
                &input_value(&email),
                &input_value(&password),
            );
            apply_outcome(outcome, &panel, &on_notice);
        })
    };
    let on_verify = {
        let stores = props.stores.clone();
        let panel = panel.clone();
        let on_notice = props.on_notice.clone();
        let code = verify_code.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let auth = AuthService::new(stores.local.kv(), stores.session.kv());
            let outcome = auth.verify(&input_value(&code), dom::now_ms());
            apply_outcome(outcome, &panel, &on_notice);
        })
    };
    let on_resend = {
        let stores = props.stores.clone();
        let on_notice = props.on_notice.clone();
        Callback::from(move |_| {
            on_notice.emit(AuthService::new(stores.local.kv(), stores.session.kv()).resend());
        })
    };
    let on_guest = {
        let stores = props.stores.clone();
        let panel = panel.clone();
        let on_notice = props.on_notice.clone();
        Callback::from(move |_| {
            let auth = AuthService::new(stores.local.kv(), stores.session.kv());
            apply_outcome(Ok(auth.continue_as_guest(dom::now_ms())), &panel, &on_notice);
        })
    };
    let on_sign_out = {
        let stores = props.stores.clone();
        let on_notice = props.on_notice.clone();
        let on_close = props.on_close.clone();
        Callback::from(move |_| {
            AuthService::new(stores.local.kv(), stores.session.kv()).sign_out();
            on_notice.emit(Notice::info("Signed out"));
            on_close.emit(());
        })
    };
    let on_done = {
        let on_close = props.on_close.clone();
        Callback::from(move |_| on_close.emit(()))
    };

    let session = AuthService::new(props.stores.local.kv(), props.stores.session.kv()).session();

    let body = match panel.step {
        AuthStep::Choice => html! {
            <div class="auth-step" data-step="choice">
                if let Some(session) = session {
                    <p class="auth-session">{ format!("Signed in as {}", session.email) }</p>
                    <button type="button" class="btn-secondary" onclick={on_sign_out}>{ "Sign Out" }</button>
                } else {
                    <button type="button" class="btn-primary" data-next="login" onclick={go(AuthStep::Login)}>{ "Log In" }</button>
                    <button type="button" class="btn-secondary" data-next="signup" onclick={go(AuthStep::Signup)}>{ "Sign Up" }</button>
                    <button type="button" class="btn-link" data-next="guest" onclick={go(AuthStep::Guest)}>{ "Continue as Guest" }</button>
                }
            </div>
        },
        AuthStep::Login => html! {
            <form id="loginForm" class="auth-step" data-step="login" onsubmit={on_login}>
                <label for="login-email">{ "Email" }</label>
                <input id="login-email" name="email" type="email" required=true ref={login_email} />
                <label for="login-password">{ "Password" }</label>
                <input id="login-password" name="password" type="password" required=true ref={login_password} />
                <button type="submit" class="btn-primary">{ "Log In" }</button>
                <button type="button" class="btn-link" data-next="signup" onclick={go(AuthStep::Signup)}>{ "Need an account? Sign up" }</button>
            </form>
        },
        AuthStep::Signup => html! {
            <form id="signupForm" class="auth-step" data-step="signup" onsubmit={on_signup}>
                <label for="signup-name">{ "Name" }</label>
                <input id="signup-name" name="name" type="text" ref={signup_name} />
                <label for="signup-email">{ "Email" }</label>
                <input id="signup-email" name="email" type="email" required=true ref={signup_email} />
                <label for="signup-password">{ "Password" }</label>
                <input id="signup-password" name="password" type="password" required=true ref={signup_password} />
                <button type="submit" class="btn-primary">{ "Create Account" }</button>
                <button type="button" class="btn-link" data-next="login" onclick={go(AuthStep::Login)}>{ "Have an account? Log in" }</button>
            </form>
        },
        AuthStep::Guest => html! {
            <div class="auth-step" data-step="guest">
                <p>{ "Book without an account. Your order stays on this device." }</p>
                <button type="button" class="btn-primary" onclick={on_guest}>{ "Continue" }</button>
                <button type="button" class="btn-link" data-next="choice" onclick={go(AuthStep::Choice)}>{ "Back" }</button>
            </div>
        },
        AuthStep::Verify => html! {
            <form id="verifyForm" class="auth-step" data-step="verify" onsubmit={on_verify}>
                <p>
                    { "We sent a code to " }
                    <strong id="verifyEmailOut">{ panel.verify_email.clone() }</strong>
                </p>
                <label for="verify-code">{ "Verification code" }</label>
                <input
                    id="verify-code"
                    name="code"
                    inputmode="numeric"
                    maxlength="6"
                    placeholder={VERIFY_CODE}
                    ref={verify_code}
                />
                <button type="submit" class="btn-primary">{ "Verify" }</button>
                <button id="resendCode" type="button" class="btn-link" onclick={on_resend}>{ "Resend code" }</button>
            </form>
        },
        AuthStep::Welcome => html! {
            <div class="auth-step" data-step="welcome">
                <p>{ "Welcome, " }<span id="welcomeName">{ panel.welcome_name.clone() }</span>{ "!" }</p>
                <button type="button" class="btn-primary" data-close="true" onclick={on_done}>{ "Start Booking" }</button>
            </div>
        },
    };

    html! {
        <Modal title={step_title(panel.step)} on_close={props.on_close.clone()} class={classes!("auth-modal")}>
            <div id="authRoot">{ body }</div>
        </Modal>
    }
}
