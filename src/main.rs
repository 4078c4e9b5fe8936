use anyhow::{anyhow, bail, Context, Result};
use std::env;
use std::path::Path;

use petflow::entities::load_expenses_csv;
use petflow::{
    booking_message, demo_history, init_tracing, quote, BookingStage, PaymentMethod, PetSize,
    Session, Settings,
};

const USAGE: &str = "\
Usage:
  petflow catalog
  petflow quote <service-id> <size> [--taxi-dog]
  petflow book <service-id> <size> <YYYY-MM-DDTHH:MM> [--taxi-dog] [--employee ID] [--payment pix|na-loja] [--pet NAME]
  petflow summary [expenses.csv]

Set PETFLOW_CONFIG to load a settings file.";

fn main() -> Result<()> {
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();
    let settings = Settings::load()?;

    match args.first().map(String::as_str) {
        Some("catalog") => run_catalog(&settings),
        Some("quote") => run_quote(&settings, &args[1..]),
        Some("book") => run_book(settings, &args[1..]),
        Some("summary") => run_summary(settings, &args[1..]),
        _ => {
            println!("{}", USAGE);
            Ok(())
        }
    }
}

fn run_catalog(settings: &Settings) -> Result<()> {
    println!("🐾 PetFlow - Serviços e Preços");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    for service in settings.catalog.services() {
        println!("\n[{}] {}", service.id, service.name);
        println!("    {}", service.description);
        for (size, price) in service.prices.iter() {
            println!("    {:<8} R$ {:.2}", size.label(), price);
        }
    }

    println!("\n👥 Funcionários");
    for employee in settings.catalog.employees() {
        println!(
            "  [{}] {} - {} ({})",
            employee.id, employee.name, employee.position, employee.working_hours
        );
    }

    if settings.add_on.enabled {
        println!("\n🚕 Táxi Dog: R$ {:.2} por viagem", settings.add_on.fee);
    } else {
        println!("\n🚕 Táxi Dog: desativado");
    }

    Ok(())
}

fn run_quote(settings: &Settings, args: &[String]) -> Result<()> {
    let (service_id, size) = match args {
        [service_id, size, ..] => (service_id, parse_size(size)?),
        _ => bail!("quote needs <service-id> <size>\n\n{}", USAGE),
    };
    let taxi_dog = args.iter().any(|a| a == "--taxi-dog");
    if taxi_dog && !settings.add_on.enabled {
        bail!("Táxi Dog is disabled in the current settings");
    }

    let service = settings.catalog.require_service(service_id)?;
    let q = quote(service, size, taxi_dog, settings.add_on.fee);

    println!("{} ({})", service.name, size);
    println!("  Serviço:  R$ {:.2}", q.base);
    if taxi_dog {
        println!("  Táxi Dog: R$ {:.2}", q.add_on);
    }
    println!("  Total:    R$ {:.2}", q.total);

    Ok(())
}

fn run_book(settings: Settings, args: &[String]) -> Result<()> {
    let (service_id, size, date_time) = match args {
        [service_id, size, date_time, ..] => (service_id, parse_size(size)?, date_time),
        _ => bail!("book needs <service-id> <size> <date-time>\n\n{}", USAGE),
    };
    let taxi_dog = args.iter().any(|a| a == "--taxi-dog");
    let employee = flag_value(args, "--employee");
    let payment = match flag_value(args, "--payment") {
        Some(value) => value.parse::<PaymentMethod>().map_err(|e| anyhow!(e))?,
        None => PaymentMethod::default(),
    };
    let pet_name = flag_value(args, "--pet").unwrap_or("Rex");

    let mut session = Session::new(settings);
    session.register_pet(pet_name, "Sem raça definida", 10.0, size)?;

    session.start_booking()?;
    session.select_service(service_id)?;
    session.select_employee(employee)?;
    {
        let booking = session.booking_mut()?;
        booking.set_date_time(date_time)?;
        booking.set_taxi_dog(taxi_dog)?;
        if booking.stage() == BookingStage::PaymentSelection {
            booking.set_payment_method(payment)?;
        }
    }

    let appointment = session.confirm_booking()?;
    let details = session
        .booking_details(&appointment)
        .context("Confirmed appointment references unknown catalog entries")?;

    println!("✅ Agendamento Confirmado!");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("{}", booking_message(&details));
    println!();
    if appointment.payment_method == PaymentMethod::Pix {
        println!("💳 Pix: {}", session.pix_qr_url());
    }
    if let Some(link) = session.whatsapp_link(&appointment.id) {
        println!("💬 WhatsApp: {}", link);
    }

    Ok(())
}

fn run_summary(settings: Settings, args: &[String]) -> Result<()> {
    let mut session = Session::with_history(settings, demo_history());
    if let Some(path) = args.first() {
        session = session.with_expenses(load_expenses_csv(Path::new(path))?);
    }

    let summary = session.financial_summary();

    println!("📊 Controle Financeiro");
    println!("━━━━━━━━━━━━━━━━━━━━━━");
    println!("Receita Total:   R$ {:.2}", summary.revenue);
    println!("Despesas Totais: R$ {:.2}", summary.expenses);
    println!("Lucro Líquido:   R$ {:.2}", summary.net_profit);
    println!(
        "Agendamentos hoje: {}",
        session.appointments_on(chrono::Local::now().date_naive())
    );

    println!("\nRelatório de Serviços");
    for total in session.service_breakdown() {
        println!(
            "  {:<16} {:>3} agendamento(s)  R$ {:.2}",
            total.service_name, total.count, total.revenue
        );
    }

    println!("\nAgendamentos");
    for appointment in session.appointments() {
        println!(
            "  {}  {:<11} R$ {:.2}",
            appointment.date_time.format("%d/%m/%Y %H:%M"),
            appointment.status.label(),
            appointment.total_price
        );
    }

    Ok(())
}

fn parse_size(value: &str) -> Result<PetSize> {
    value.parse::<PetSize>().map_err(|e| anyhow!(e))
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}
