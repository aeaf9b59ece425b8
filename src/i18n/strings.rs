//! Static UI string tables.

use super::Language;

/// Strings for the chat view.
#[derive(Debug)]
pub struct ChatStrings {
    pub placeholder: &'static str,
    pub new_chat: &'static str,
    pub empty_state: &'static str,
    pub bot_name: &'static str,
    pub typing: &'static str,
    pub send_failed: &'static str,
}

/// Strings for the login and registration forms.
#[derive(Debug)]
pub struct AuthStrings {
    pub login_title: &'static str,
    pub register_title: &'static str,
    pub username: &'static str,
    pub password: &'static str,
    pub email: &'static str,
    pub name: &'static str,
    pub age: &'static str,
    pub login: &'static str,
    pub register: &'static str,
    pub logout: &'static str,
    pub welcome: &'static str,
}

#[derive(Debug)]
pub struct MenuStrings {
    pub history: &'static str,
    pub language: &'static str,
}

/// Status and error messages.
#[derive(Debug)]
pub struct MessageStrings {
    pub login_success: &'static str,
    pub register_success: &'static str,
    pub login_error: &'static str,
    pub register_error: &'static str,
    pub network_error: &'static str,
    pub not_logged_in: &'static str,
    pub logged_out: &'static str,
}

/// The complete string table for one language.
#[derive(Debug)]
pub struct Translations {
    pub chat: ChatStrings,
    pub auth: AuthStrings,
    pub menu: MenuStrings,
    pub messages: MessageStrings,
}

const PT_BR: Translations = Translations {
    chat: ChatStrings {
        placeholder: "Digite sua mensagem...",
        new_chat: "Novo Chat",
        empty_state: "Comece uma conversa com o SarcasticBot",
        bot_name: "SarcasticBot",
        typing: "Digitando...",
        send_failed: "Erro ao enviar mensagem. Tente novamente.",
    },
    auth: AuthStrings {
        login_title: "Entrar",
        register_title: "Registrar",
        username: "Usuário",
        password: "Senha",
        email: "E-mail",
        name: "Nome",
        age: "Idade",
        login: "Entrar",
        register: "Registrar",
        logout: "Sair",
        welcome: "Bem-vindo",
    },
    menu: MenuStrings {
        history: "Histórico de Chat",
        language: "Idioma",
    },
    messages: MessageStrings {
        login_success: "Login realizado com sucesso!",
        register_success: "Conta criada com sucesso! Faça login para continuar.",
        login_error: "Erro no login",
        register_error: "Erro no registro",
        network_error: "Erro de conexão com o servidor",
        not_logged_in: "Você não está logado. Execute 'quip login' primeiro.",
        logged_out: "Sessão encerrada.",
    },
};

const EN: Translations = Translations {
    chat: ChatStrings {
        placeholder: "Type your message...",
        new_chat: "New Chat",
        empty_state: "Start a conversation with SarcasticBot",
        bot_name: "SarcasticBot",
        typing: "Typing...",
        send_failed: "Error sending message. Please try again.",
    },
    auth: AuthStrings {
        login_title: "Sign In",
        register_title: "Register",
        username: "Username",
        password: "Password",
        email: "Email",
        name: "Name",
        age: "Age",
        login: "Sign In",
        register: "Register",
        logout: "Logout",
        welcome: "Welcome",
    },
    menu: MenuStrings {
        history: "Chat History",
        language: "Language",
    },
    messages: MessageStrings {
        login_success: "Login successful!",
        register_success: "Account created successfully! Please login to continue.",
        login_error: "Login error",
        register_error: "Registration error",
        network_error: "Connection error with server",
        not_logged_in: "You are not logged in. Run 'quip login' first.",
        logged_out: "Logged out.",
    },
};

/// Looks up the string table for a language.
pub const fn translations(language: Language) -> &'static Translations {
    match language {
        Language::PtBr => &PT_BR,
        Language::En => &EN,
    }
}
