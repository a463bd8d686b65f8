//! Italian/German distributor layout. Header cells carry both languages on
//! two lines; every item row repeats the fixed unit of measure and VAT rate.

use rust_decimal::Decimal;

use super::{Align, Block, Cell, Table};
use crate::calculations::Totals;
use crate::calculations::common::format_amount;
use crate::calculations::totals::vat_percent_label;
use crate::models::QuoteDocument;

const DEALER: [&str; 4] = [
    "BELOTTI MACCHINE AGRICOLE",
    "Via Copernico 13/A - 39100 BOLZANO",
    "P. Iva IT01752500213 - Cod. fisc. 01752500213",
    "Tel. 0471 20 26 51 - E-Mail: info@minipale.it",
];

const UNIT_OF_MEASURE: &str = "NR";

const VALIDITY: &str = "Validità offerta 30 gg - Gültigkeit des Angebots 30 Tage";

fn amount(value: Decimal) -> String {
    format_amount(value)
}

pub(super) fn blocks(
    doc: &QuoteDocument,
    totals: &Totals,
) -> Vec<Block> {
    let client = &doc.client;
    let vat = vat_percent_label();

    let header = Block::Columns(vec![
        vec![
            Block::Logo {
                source: doc.company_logo.clone(),
            },
            Block::heading(DEALER[0]),
            Block::lines(DEALER[1..].iter().copied()),
        ],
        vec![
            Block::heading("PREVENTIVO / ANGEBOT").aligned(Align::Right),
            Block::line(format!(
                "N° {} del/vom {}",
                doc.quote_number, doc.quote_date
            ))
            .aligned(Align::Right),
        ],
    ]);

    let parties = Block::Columns(vec![
        vec![
            Block::heading("Cliente / Kunde"),
            Block::line(client.name.clone()).emphasized(),
            Block::lines([client.address.clone(), client.city.clone()]),
        ],
        vec![
            Block::heading("Destinazione / Bestimmungsort"),
            Block::lines([
                client.address.clone(),
                client.city.clone(),
                format!("P.IVA: {} - C.F.: {}", client.vat_id, client.fiscal_code),
            ]),
        ],
    ]);

    let items = Table {
        columns: 7,
        header: vec![
            Cell::new("Codice\nKodex"),
            Cell::new("Descrizione\nBeschreibung"),
            Cell::new("UM\nME").align(Align::Center),
            Cell::new("Qt\nMenge").align(Align::Center),
            Cell::new("Prezzo €\nPreis €").align(Align::Right),
            Cell::new("%\n%").align(Align::Center),
            Cell::new("Importo €\nBetrag €").align(Align::Right),
        ],
        rows: doc
            .items
            .iter()
            .map(|item| {
                vec![
                    Cell::new(item.code.clone()),
                    Cell::new(item.description.clone()),
                    Cell::new(UNIT_OF_MEASURE).align(Align::Center),
                    Cell::new(item.quantity.to_string()).align(Align::Center),
                    Cell::new(amount(item.unit_price)).align(Align::Right),
                    Cell::new(vat.clone()).align(Align::Center),
                    Cell::new(amount(item.total)).align(Align::Right),
                ]
            })
            .collect(),
        bordered: true,
    };

    let tax_summary = Table {
        columns: 4,
        header: vec![
            Cell::new("Cod.\nKod."),
            Cell::new("Aliquota IVA\n% MWSt."),
            Cell::new("Imponibile €\nSteuergrundlage €").align(Align::Right),
            Cell::new("Importo IVA €\nMWSt. Betrag €").align(Align::Right),
        ],
        rows: vec![
            vec![
                Cell::new(format!("IVA {vat}%")),
                Cell::new(vat.clone()),
                Cell::new(amount(totals.net_total)).align(Align::Right),
                Cell::new(amount(totals.vat)).align(Align::Right),
            ],
            vec![
                Cell::new("TOTALI/SUMMEN").align(Align::Right).bold().span(2),
                Cell::new(amount(totals.net_total)).align(Align::Right).bold(),
                Cell::new(amount(totals.vat)).align(Align::Right).bold(),
            ],
        ],
        bordered: true,
    };

    let mut notes: Vec<String> = doc.notes.lines().map(str::to_string).collect();
    notes.push(String::new());
    notes.push(VALIDITY.to_string());

    vec![
        header,
        parties,
        Block::Table(items),
        Block::Table(tax_summary),
        Block::heading(format!("€ {}", amount(totals.total_with_vat))).aligned(Align::Right),
        Block::lines(notes),
    ]
}
