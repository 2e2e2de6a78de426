#[cfg(all(feature = "es", feature = "en"))]
compile_error!("Cannot enable both 'es' and 'en' features at the same time");

#[cfg(not(feature = "en"))]
pub mod strings {
    pub const YOUR_ITEMS: &str = "TUS PRODUCTOS";
    pub const SUBTOTAL: &str = "Subtotal";
    pub const TIP: &str = "Propina (10%)";
    pub const TOTAL_DUE: &str = "TOTAL A PAGAR";
    pub const TRANSFER_DETAILS: &str = "DATOS PARA TRANSFERIR";
    pub const PAYER_NAME: &str = "Nombre:";
    pub const PAYER_RUT: &str = "RUT:";
    pub const PAYER_BANK: &str = "Banco:";
    pub const PAYER_ACCOUNT_TYPE: &str = "Tipo de Cuenta:";
    pub const PAYER_ACCOUNT_NUMBER: &str = "N° Cuenta:";
    pub const THANKS: &str = "¡Gracias!";
    pub const EMAIL_SUBJECT: &str = "Detalle de tu cuenta";

    pub const UNNAMED_BILL: &str = "Cuenta sin nombre";
    pub const PLACEHOLDER_ITEM: &str = "Nuevo Producto";
    pub const GUEST: &str = "Invitado";

    pub const BILL_HISTORY: &str = "Historial de Cuentas";
    pub const EMPTY_HISTORY: &str = "No tienes cuentas divididas aún. ¡Crea una para empezar!";
    pub const HISTORY_ENTRY_NOT_FOUND: &str = "Entrada de historial no encontrada.";
    pub const BILL_TOTAL: &str = "Total Cuenta";
    pub const PAID_AMOUNT: &str = "Pagado";
    pub const REMAINING_AMOUNT: &str = "Restante";
    pub const FULLY_PAID: &str = "¡Cuenta Saldada!";
    pub const DINER_PAYMENTS: &str = "Pagos de Comensales";
    pub const PAID: &str = "Pagado";
    pub const PENDING: &str = "Pendiente";
    pub const MONTHS_SHORT: [&str; 12] = [
        "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
    ];

    pub const NAME_REQUIRED: &str = "El nombre es obligatorio.";
    pub const CONTACT_REQUIRED: &str = "Se requiere un email o un teléfono (WhatsApp).";
    pub const INVALID_EMAIL: &str = "El formato del email es incorrecto.";
    pub const ALL_FIELDS_REQUIRED: &str = "Todos los campos son obligatorios.";
    pub const EMAIL_ALREADY_REGISTERED: &str = "El email ya está registrado.";
    pub const INVALID_CREDENTIALS: &str = "Email o contraseña incorrectos.";

    pub const OCR_NOT_CONFIGURED: &str =
        "La API Key de Gemini no está configurada. La funcionalidad de escaneo está deshabilitada.";
    pub const NO_ITEMS_DETECTED: &str = "No se pudieron detectar productos en la boleta. Inténtalo de nuevo con una foto más clara.";
    pub const NO_IMAGE: &str = "No se pudo obtener la imagen. Inténtalo de nuevo.";
    pub const SCAN_IN_PROGRESS: &str = "Ya se está procesando una boleta.";
    pub const SCAN_CANCELLED: &str = "Captura cancelada.";
    pub const STORAGE_FAILED: &str = "No se pudo guardar la información.";
}

#[cfg(feature = "en")]
pub mod strings {
    pub const YOUR_ITEMS: &str = "YOUR ITEMS";
    pub const SUBTOTAL: &str = "Subtotal";
    pub const TIP: &str = "Tip (10%)";
    pub const TOTAL_DUE: &str = "TOTAL DUE";
    pub const TRANSFER_DETAILS: &str = "TRANSFER DETAILS";
    pub const PAYER_NAME: &str = "Name:";
    pub const PAYER_RUT: &str = "Tax ID:";
    pub const PAYER_BANK: &str = "Bank:";
    pub const PAYER_ACCOUNT_TYPE: &str = "Account Type:";
    pub const PAYER_ACCOUNT_NUMBER: &str = "Account No.:";
    pub const THANKS: &str = "Thanks!";
    pub const EMAIL_SUBJECT: &str = "Your bill details";

    pub const UNNAMED_BILL: &str = "Unnamed bill";
    pub const PLACEHOLDER_ITEM: &str = "New Item";
    pub const GUEST: &str = "Guest";

    pub const BILL_HISTORY: &str = "Bill History";
    pub const EMPTY_HISTORY: &str = "You have no split bills yet. Create one to get started!";
    pub const HISTORY_ENTRY_NOT_FOUND: &str = "History entry not found.";
    pub const BILL_TOTAL: &str = "Bill Total";
    pub const PAID_AMOUNT: &str = "Paid";
    pub const REMAINING_AMOUNT: &str = "Remaining";
    pub const FULLY_PAID: &str = "Bill settled!";
    pub const DINER_PAYMENTS: &str = "Diner Payments";
    pub const PAID: &str = "Paid";
    pub const PENDING: &str = "Pending";
    pub const MONTHS_SHORT: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];

    pub const NAME_REQUIRED: &str = "Name is required.";
    pub const CONTACT_REQUIRED: &str = "An email or a phone number (WhatsApp) is required.";
    pub const INVALID_EMAIL: &str = "The email format is invalid.";
    pub const ALL_FIELDS_REQUIRED: &str = "All fields are required.";
    pub const EMAIL_ALREADY_REGISTERED: &str = "This email is already registered.";
    pub const INVALID_CREDENTIALS: &str = "Wrong email or password.";

    pub const OCR_NOT_CONFIGURED: &str =
        "The Gemini API key is not configured. Receipt scanning is disabled.";
    pub const NO_ITEMS_DETECTED: &str =
        "No items could be detected on the receipt. Try again with a clearer photo.";
    pub const NO_IMAGE: &str = "Could not get the image. Please try again.";
    pub const SCAN_IN_PROGRESS: &str = "A receipt is already being processed.";
    pub const SCAN_CANCELLED: &str = "Capture cancelled.";
    pub const STORAGE_FAILED: &str = "Could not save the data.";
}

pub use strings::*;

pub struct GreetingMessage<'a> {
    first_name: &'a str,
    wave: bool,
}

/// Opening line of a bill message. The plain variant keeps the empty slot
/// where the wave emoji would go.
pub fn greeting(first_name: &str, wave: bool) -> GreetingMessage<'_> {
    GreetingMessage { first_name, wave }
}

pub struct SharedBetweenMessage {
    count: usize,
}

pub fn shared_between(count: usize) -> SharedBetweenMessage {
    SharedBetweenMessage { count }
}

pub struct OcrFailedMessage<'a> {
    detail: &'a str,
}

pub fn ocr_failed(detail: &str) -> OcrFailedMessage<'_> {
    OcrFailedMessage { detail }
}

pub fn hello_user(first_name: Option<&str>) -> String {
    hello_user_impl(first_name.unwrap_or(GUEST))
}

#[cfg(not(feature = "en"))]
fn hello_user_impl(name: &str) -> String {
    format!("Hola, {name}!")
}

#[cfg(feature = "en")]
fn hello_user_impl(name: &str) -> String {
    format!("Hi, {name}!")
}

#[cfg(not(feature = "en"))]
impl std::fmt::Display for GreetingMessage<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let wave = if self.wave { "👋" } else { "" };
        write!(
            f,
            "Hola {}! {wave} Tu parte de la cuenta es:",
            self.first_name
        )
    }
}

#[cfg(feature = "en")]
impl std::fmt::Display for GreetingMessage<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let wave = if self.wave { "👋" } else { "" };
        write!(f, "Hi {}! {wave} Your share of the bill is:", self.first_name)
    }
}

#[cfg(not(feature = "en"))]
impl std::fmt::Display for SharedBetweenMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(dividido entre {})", self.count)
    }
}

#[cfg(feature = "en")]
impl std::fmt::Display for SharedBetweenMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(split between {})", self.count)
    }
}

#[cfg(not(feature = "en"))]
impl std::fmt::Display for OcrFailedMessage<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error al procesar la boleta con Gemini: {}", self.detail)
    }
}

#[cfg(feature = "en")]
impl std::fmt::Display for OcrFailedMessage<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error processing the receipt with Gemini: {}", self.detail)
    }
}
