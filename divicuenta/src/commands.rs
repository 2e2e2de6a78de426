use std::{borrow::Cow, fs, path::Path};

use divicuenta_application::{
    BillSession, CaptureResult, HistoryLedger, IdentityProvider, PaymentUpdate, ReceiptScanner,
    Registration, ScanOutcome,
};
use divicuenta_domain::{DinerId, HistoryId};
use divicuenta_i18n as i18n;
use divicuenta_presentation::{
    BillMessage, EMAIL_SUBJECT, HistoryPresenter, format_auth_error, format_currency,
    format_scan_error, format_store_error, whatsapp_number,
};

use crate::{
    bill_file::BillFile,
    bootstrap::{AppConfig, AppContext},
    cli::{Command, HistoryCommand, SignupArgs},
};

pub type CliResult<T> = Result<T, Cow<'static, str>>;

pub fn run(command: Command, config: &AppConfig) -> CliResult<()> {
    let context = AppContext::new(config);
    match command {
        Command::Split {
            bill,
            whatsapp,
            save,
        } => split(&context, &bill, whatsapp, save),
        Command::Scan { image, mime } => scan(&context, config, &image, mime),
        Command::History(command) => history(&context, command),
        Command::Signup(args) => signup(&context, args),
        Command::Login { email, password } => login(&context, &email, &password),
        Command::Logout => logout(&context),
        Command::Whoami => whoami(&context),
    }
}

fn open_identity(context: &AppContext) -> CliResult<IdentityProvider<'_>> {
    IdentityProvider::open(&context.store, &context.ids).map_err(|err| format_store_error(&err))
}

fn open_ledger(context: &AppContext) -> CliResult<HistoryLedger<'_>> {
    HistoryLedger::open(&context.store, &context.clock, &context.ids)
        .map_err(|err| format_store_error(&err))
}

fn split(context: &AppContext, path: &Path, whatsapp: bool, save: bool) -> CliResult<()> {
    let source = fs::read_to_string(path)
        .map_err(|err| format!("Failed to read '{}': {err}", path.display()))?;
    let mut session = BillSession::new(&context.ids);
    BillFile::from_json(&source)?.load_into(&mut session)?;
    if !session.can_confirm() {
        return Err("The bill needs at least one item and one diner".into());
    }

    let payer = open_identity(context)?.payer_info();
    let allocation = session.allocate();
    for bill in &allocation.diner_bills {
        println!("== {} ({}) ==", bill.diner.name, format_currency(bill.total));
        if whatsapp {
            if let Some(phone) = &bill.diner.phone {
                println!("WhatsApp: +{}", whatsapp_number(phone));
            }
            println!("{}\n", BillMessage::whatsapp(bill, &payer));
        } else {
            if let Some(email) = &bill.diner.email {
                println!("Para: {email}\nAsunto: {EMAIL_SUBJECT}");
            }
            println!("{}\n", BillMessage::plain_text(bill, &payer));
        }
    }
    println!(
        "{}: {}",
        i18n::BILL_TOTAL,
        format_currency(allocation.bill_total.total)
    );

    if save {
        let mut ledger = open_ledger(context)?;
        let entry = ledger
            .add_entry(session.snapshot())
            .map_err(|err| format_store_error(&err))?;
        println!("{}", entry.id);
    }
    Ok(())
}

fn scan(context: &AppContext, config: &AppConfig, path: &Path, mime: Option<String>) -> CliResult<()> {
    let bytes =
        fs::read(path).map_err(|err| format!("Failed to read '{}': {err}", path.display()))?;
    let mime_type = match mime {
        Some(mime) => mime,
        None => guess_mime(path)
            .ok_or_else(|| format!("Cannot guess the image type of '{}'; pass --mime", path.display()))?
            .to_string(),
    };

    let ocr = config
        .receipt_ocr()
        .map_err(|err| i18n::ocr_failed(&err.to_string()).to_string())?;
    let scanner = ReceiptScanner::new(&ocr);
    let mut session = BillSession::new(&context.ids);

    match scanner
        .scan(&mut session, CaptureResult::Captured { bytes, mime_type })
        .map_err(|err| format_scan_error(&err))?
    {
        ScanOutcome::Loaded { item_count } => {
            tracing::info!(item_count, "receipt loaded");
            let skeleton = BillFile::from_items(session.restaurant(), session.items());
            let json = serde_json::to_string_pretty(&skeleton)
                .map_err(|err| format!("Failed to encode items: {err}"))?;
            println!("{json}");
        }
        ScanOutcome::Cancelled => println!("{}", i18n::SCAN_CANCELLED),
    }
    Ok(())
}

fn guess_mime(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "heic" => Some("image/heic"),
        "heif" => Some("image/heif"),
        _ => None,
    }
}

fn history(context: &AppContext, command: HistoryCommand) -> CliResult<()> {
    let mut ledger = open_ledger(context)?;
    match command {
        HistoryCommand::List => {
            println!("{}", HistoryPresenter::render_dashboard(ledger.entries()));
        }
        HistoryCommand::Show { id } => {
            let id = HistoryId::new(id);
            println!("{}", render_entry(&ledger, &id)?);
        }
        HistoryCommand::Pay {
            id,
            diner_id,
            unpaid,
        } => {
            let id = HistoryId::new(id);
            let diner_id = DinerId::new(diner_id);
            match ledger
                .set_payment_status(&id, &diner_id, !unpaid)
                .map_err(|err| format_store_error(&err))?
            {
                PaymentUpdate::Applied => println!("{}", render_entry(&ledger, &id)?),
                PaymentUpdate::UnknownEntry => return Err(i18n::HISTORY_ENTRY_NOT_FOUND.into()),
                PaymentUpdate::UnknownDiner => {
                    return Err(format!("Unknown diner '{diner_id}' in {id}").into());
                }
            }
        }
    }
    Ok(())
}

fn render_entry(ledger: &HistoryLedger<'_>, id: &HistoryId) -> CliResult<String> {
    let (Some(entry), Some(allocation), Some(summary)) =
        (ledger.find(id), ledger.allocation(id), ledger.summary(id))
    else {
        return Err(i18n::HISTORY_ENTRY_NOT_FOUND.into());
    };
    Ok(HistoryPresenter::detail(entry, &allocation, &summary).to_text())
}

fn signup(context: &AppContext, args: SignupArgs) -> CliResult<()> {
    let identity = open_identity(context)?;
    let SignupArgs {
        name,
        email,
        password,
        rut,
        phone,
        bank,
        account_type,
        account_number,
    } = args;
    let profile = identity
        .sign_up(Registration {
            name,
            email,
            password,
            rut,
            phone,
            bank,
            account_type,
            account_number,
        })
        .map_err(|err| format_auth_error(&err))?;
    println!("{}", profile.id);
    Ok(())
}

fn login(context: &AppContext, email: &str, password: &str) -> CliResult<()> {
    let mut identity = open_identity(context)?;
    let profile = identity
        .login(email, password)
        .map_err(|err| format_auth_error(&err))?;
    println!("{}", i18n::hello_user(Some(profile.first_name())));
    Ok(())
}

fn logout(context: &AppContext) -> CliResult<()> {
    open_identity(context)?
        .logout()
        .map_err(|err| format_store_error(&err))
}

fn whoami(context: &AppContext) -> CliResult<()> {
    let identity = open_identity(context)?;
    let user = identity.current_user();
    println!("{}", i18n::hello_user(user.map(|user| user.first_name())));
    if let Some(user) = user {
        println!("{}", user.email);
    }

    let payer = identity.payer_info();
    println!("\n{}", i18n::TRANSFER_DETAILS);
    println!("{} {}", i18n::PAYER_NAME, payer.name);
    println!("{} {}", i18n::PAYER_RUT, payer.rut);
    println!("{} {}", i18n::PAYER_BANK, payer.bank);
    println!("{} {}", i18n::PAYER_ACCOUNT_TYPE, payer.account_type);
    println!("{} {}", i18n::PAYER_ACCOUNT_NUMBER, payer.account_number);
    Ok(())
}
