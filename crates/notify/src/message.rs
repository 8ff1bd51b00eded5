use serde::Serialize;

use roofline_quotes::QuoteLead;

/// The fields of a new-quote message, already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteNotification {
    pub customer_name: String,
    pub phone: String,
    pub city: String,
    pub product: String,
    /// e.g. `35,5 m²`
    pub area: String,
    /// e.g. `R$ 10.000,00`
    pub total_cash: String,
    pub total_installments: String,
}

impl QuoteNotification {
    pub fn from_lead(lead: &QuoteLead) -> Self {
        Self {
            customer_name: lead.customer_name.clone(),
            phone: lead.phone.clone(),
            city: lead.city.clone(),
            product: lead.solution_title.clone(),
            area: format!("{} m²", lead.area.to_short_string().replace('.', ",")),
            total_cash: lead.total_cash.format_brl(),
            total_installments: lead.total_installments.format_brl(),
        }
    }

    /// Message body sent to the sales team.
    pub fn render(&self) -> String {
        format!(
            "*Novo orçamento*\n\
             Cliente: {}\n\
             Telefone: {}\n\
             Cidade: {}\n\
             Produto: {}\n\
             Área: {}\n\
             À vista: {}\n\
             Parcelado: {}",
            self.customer_name,
            self.phone,
            self.city,
            self.product,
            self.area,
            self.total_cash,
            self.total_installments,
        )
    }
}
