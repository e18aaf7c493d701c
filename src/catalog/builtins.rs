//! Built-in automation catalog for cleaning companies.

use super::types::{AutomationRecord, Category, Difficulty, RoiPotential};

// Difficulty and ROI both have a `Medium` level.
use super::types::Difficulty::{Easy, Hard, Medium as Moderate};
use super::types::RoiPotential::{High, Low, Medium};

fn automation(
    name: &str,
    description: &str,
    difficulty: Difficulty,
    time: &str,
    cost: &str,
    roi: RoiPotential,
    tools: &[&str],
) -> AutomationRecord {
    AutomationRecord::new(name)
        .with_description(description)
        .with_difficulty(difficulty)
        .with_estimates(time, cost)
        .with_roi(roi)
        .with_tools(tools)
}

/// All built-in categories in display order.
pub fn categories() -> Vec<Category> {
    vec![
        client_onboarding(),
        booking_and_scheduling(),
        payments_and_invoicing(),
        team_operations(),
        marketing_and_sales(),
        customer_communication(),
        reporting_and_analytics(),
    ]
}

/// Client onboarding and account management.
pub fn client_onboarding() -> Category {
    Category::new(
        "Client Onboarding & Management",
        "👥",
        vec![
            automation("New client welcome email sequence", "Send a timed series of welcome emails introducing your team, services, and what to expect.", Easy, "1-2 hours", "$0-20/month", High, &["Mailchimp", "Zapier"]),
            automation("Auto-send intake form after booking", "Email a property intake form as soon as a booking is confirmed.", Easy, "1 hour", "$0-15/month", High, &["Jotform", "Zapier"]),
            automation("Automated quote generator", "Generate instant quotes from square footage, room count, and service type.", Hard, "6-10 hours", "$20-50/month", High, &["Typeform", "Google Sheets", "Zapier"]),
            automation("CRM entry upon lead submission", "Create a CRM contact whenever a website lead form is submitted.", Easy, "1 hour", "$0-20/month", High, &["HubSpot", "Zapier"]),
            automation("Auto-reminder to complete service agreement", "Nudge clients who have not signed their service agreement within 48 hours.", Easy, "1-2 hours", "$0-25/month", Medium, &["DocuSign", "Zapier"]),
            automation("Assign client to team based on zip code", "Route new clients to the crew that covers their zip code.", Moderate, "3-4 hours", "$0-20/month", Medium, &["Jobber", "Google Sheets", "Make.com"]),
            automation("Birthday or anniversary client greeting email", "Send a personal greeting on client birthdays and service anniversaries.", Easy, "1 hour", "$0-10/month", Low, &["Mailchimp"]),
            automation("Follow-up email after service with feedback link", "Ask for feedback a few hours after each completed visit.", Easy, "1 hour", "$0-15/month", High, &["Google Forms", "Zapier"]),
            automation("Send review request via SMS/email", "Request a public review once a client rates a visit highly.", Easy, "1-2 hours", "$10-30/month", High, &["Twilio", "NiceJob"]),
            automation("Tag clients based on service frequency", "Label clients as weekly, biweekly, monthly, or one-time in the CRM.", Moderate, "2-3 hours", "$0-20/month", Medium, &["HubSpot", "Zapier"]),
            automation("Auto-schedule recurring appointments", "Book the next visit automatically for recurring service plans.", Moderate, "3-5 hours", "$25-50/month", High, &["Jobber", "Google Calendar"]),
            automation("Client reactivation campaigns after 60+ days", "Reach out with an offer when a client has not booked for 60 days.", Moderate, "2-4 hours", "$10-30/month", High, &["Mailchimp", "HubSpot"]),
            automation("Auto-update Google Sheet with new client info", "Append every new client to a shared spreadsheet for the office team.", Easy, "30 minutes", "$0-10/month", Low, &["Google Sheets", "Zapier"]),
            automation("Send \"pre-clean checklist\" automatically before visit", "Email clients a preparation checklist the day before their first clean.", Easy, "1 hour", "$0-10/month", Medium, &["Gmail", "Zapier"]),
            automation("Move client to VIP tag after 10 services", "Promote loyal clients to a VIP segment after their tenth visit.", Moderate, "2 hours", "$0-20/month", Medium, &["HubSpot", "Make.com"]),
        ],
    )
    .with_color("#2E86AB")
}

/// Online booking and crew scheduling.
pub fn booking_and_scheduling() -> Category {
    Category::new(
        "Booking & Scheduling",
        "📅",
        vec![
            automation("Online booking form → Google Calendar", "Turn website bookings into calendar events with the client's address and notes attached.", Easy, "1-2 hours", "$0-15/month", High, &["Calendly", "Google Calendar"]),
            automation("Auto-notification to cleaner about new job", "Text the assigned cleaner when a new job lands on their schedule.", Easy, "1 hour", "$5-20/month", High, &["Twilio", "Zapier"]),
            automation("Rescheduling link auto-included in reminders", "Add a self-service reschedule link to every reminder message.", Easy, "1 hour", "$0-15/month", Medium, &["Calendly"]),
            automation("Auto-cancel recurring job if card fails", "Pause the next recurring visit when the stored card is declined.", Moderate, "3-4 hours", "$0-20/month", Medium, &["Stripe", "Jobber"]),
            automation("Send ETA texts to clients 1 hour before arrival", "Let clients know when the crew is an hour away.", Moderate, "2-3 hours", "$10-30/month", High, &["Twilio", "Google Maps"]),
            automation("Send weekly schedule to team every Monday", "Email each cleaner their week of jobs every Monday morning.", Easy, "1 hour", "$0-10/month", Medium, &["Google Calendar", "Zapier"]),
            automation("Auto-assign cleaners based on zone/availability", "Match jobs to cleaners by service zone and open calendar slots.", Hard, "8-12 hours", "$30-80/month", High, &["Jobber", "Make.com"]),
            automation("Buffer time automation between bookings", "Insert travel and reset time between consecutive bookings.", Moderate, "2 hours", "$0-15/month", Medium, &["Calendly", "Google Calendar"]),
            automation("Auto-block days off from calendar", "Block booking slots when a cleaner's time off is approved.", Easy, "1 hour", "$0-10/month", Low, &["Google Calendar", "Zapier"]),
            automation("Cleaning crew shift reminder SMS", "Text crews a reminder the evening before each shift.", Easy, "1 hour", "$5-20/month", Medium, &["Twilio"]),
            automation("Day-before job confirmation SMS/email", "Confirm tomorrow's visit with the client and capture any changes.", Easy, "1 hour", "$5-20/month", High, &["Twilio", "Mailchimp"]),
            automation("Auto-reschedule on public holidays", "Move visits that fall on public holidays to the next open day.", Moderate, "3 hours", "$0-15/month", Low, &["Google Calendar", "Make.com"]),
            automation("Weather alert integration for outdoor jobs", "Warn the office when forecast conditions threaten outdoor work.", Hard, "5-8 hours", "$10-40/month", Low, &["OpenWeather API", "Make.com"]),
            automation("Double-booking prevention alert", "Alert the scheduler when two jobs overlap for the same crew.", Moderate, "2-4 hours", "$0-20/month", Medium, &["Google Calendar", "Zapier"]),
            automation("Missed booking alert and recovery automation", "Flag abandoned booking attempts and follow up to recover them.", Moderate, "3-4 hours", "$10-30/month", High, &["Calendly", "HubSpot"]),
        ],
    )
    .with_color("#A23B72")
}

/// Billing, collections, and accounting sync.
pub fn payments_and_invoicing() -> Category {
    Category::new(
        "Payments & Invoicing",
        "💰",
        vec![
            automation("Auto-generate invoice after job completion", "Create and send the invoice the moment a job is marked done.", Easy, "1-2 hours", "$0-30/month", High, &["QuickBooks", "Jobber"]),
            automation("Stripe payment failed → send retry link", "Send a secure link to update payment details after a failed charge.", Easy, "1 hour", "$0-10/month", High, &["Stripe", "Zapier"]),
            automation("Send invoice reminders every 3 days (max 3x)", "Chase unpaid invoices with up to three spaced reminders.", Easy, "1 hour", "$0-15/month", High, &["QuickBooks", "Xero"]),
            automation("Auto-charge recurring cleaning clients", "Charge the card on file after each recurring visit.", Moderate, "2-3 hours", "$0-30/month", High, &["Stripe"]),
            automation("Send thank you receipt after payment", "Email a branded receipt with a thank-you note once payment clears.", Easy, "30 minutes", "$0-10/month", Low, &["Stripe", "Mailchimp"]),
            automation("Sync payments with QuickBooks/Xero", "Post every payment into the accounting ledger automatically.", Moderate, "2-4 hours", "$10-30/month", High, &["QuickBooks", "Xero", "Zapier"]),
            automation("Auto-calculate travel surcharges", "Add a distance-based surcharge for addresses outside the core service area.", Moderate, "3-5 hours", "$0-20/month", Medium, &["Google Maps", "Google Sheets"]),
            automation("First-time discount automatically applied", "Apply the new-client discount on the first invoice.", Easy, "1 hour", "$0-10/month", Medium, &["Stripe", "Jobber"]),
            automation("Add upsells (fridge, oven) in invoice builder", "Offer add-on services as line items when building invoices.", Moderate, "2-3 hours", "$0-20/month", Medium, &["Jobber", "QuickBooks"]),
            automation("Auto-tag \"high-ticket\" clients in CRM", "Tag clients whose lifetime spend crosses a set threshold.", Easy, "1 hour", "$0-15/month", Medium, &["HubSpot", "Zapier"]),
            automation("Auto-apply coupon code from referral system", "Credit referral coupons to invoices without manual entry.", Moderate, "2-3 hours", "$0-25/month", Medium, &["Stripe", "ReferralCandy"]),
            automation("Estimate calculator form with automatic email follow-up", "Email a written estimate and follow up if it is not accepted.", Moderate, "3-5 hours", "$10-30/month", High, &["Typeform", "Mailchimp"]),
            automation("Notify admin when client exceeds late payment threshold", "Alert the office when a client has overdue balances past the limit.", Easy, "1 hour", "$0-10/month", Medium, &["QuickBooks", "Slack"]),
            automation("Auto-suspend services until payment is received", "Hold future bookings for accounts with unpaid invoices.", Moderate, "2-4 hours", "$0-20/month", Medium, &["Jobber", "Stripe"]),
            automation("Payment data dashboard updates daily", "Refresh a revenue and collections dashboard every morning.", Moderate, "3-4 hours", "$0-20/month", Low, &["Google Sheets", "Looker Studio"]),
        ],
    )
    .with_color("#F18F01")
}

/// Crew management, time tracking, and field operations.
pub fn team_operations() -> Category {
    Category::new(
        "Team Management & Operations",
        "👷",
        vec![
            automation("Send daily job route to each cleaner", "Send each cleaner an ordered list of today's stops with directions.", Moderate, "2-4 hours", "$10-30/month", High, &["Google Maps", "Twilio"]),
            automation("Auto clock-in/out system via geolocation", "Clock cleaners in and out when their phone arrives at or leaves a job site.", Hard, "6-10 hours", "$20-60/month", High, &["Connecteam", "Jobber"]),
            automation("Slack/WhatsApp message if staff doesn't check-in", "Ping the manager when a cleaner misses their check-in window.", Easy, "1-2 hours", "$0-15/month", Medium, &["Slack", "WhatsApp Business"]),
            automation("Team KPI tracker update every week", "Roll up weekly jobs, ratings, and hours into a team scorecard.", Moderate, "3-4 hours", "$0-20/month", Medium, &["Google Sheets", "Zapier"]),
            automation("Auto-assign team leads per route", "Pick a lead for each route based on seniority and schedule.", Moderate, "2-3 hours", "$0-15/month", Low, &["Jobber", "Make.com"]),
            automation("Weekly timesheet auto-submission reminder", "Remind staff to submit timesheets before the payroll cutoff.", Easy, "30 minutes", "$0-10/month", Medium, &["Slack", "Gusto"]),
            automation("Auto-upload photos of completed jobs to shared drive", "File before/after photos into a per-client folder.", Easy, "1-2 hours", "$0-15/month", Medium, &["Google Drive", "Zapier"]),
            automation("Cleaning checklist completion tracking", "Record which checklist items were finished on every visit.", Moderate, "3-4 hours", "$10-30/month", High, &["Connecteam", "Google Forms"]),
            automation("Job satisfaction survey from cleaner", "Ask cleaners to rate each job's conditions and workload.", Easy, "1 hour", "$0-10/month", Low, &["Google Forms"]),
            automation("Auto-flag negative reviews for manager review", "Route low ratings to a manager for same-day follow-up.", Easy, "1 hour", "$0-15/month", High, &["NiceJob", "Slack"]),
            automation("Equipment maintenance reminder every 30 uses", "Schedule vacuum and machine servicing after every 30 uses.", Moderate, "2 hours", "$0-10/month", Low, &["Google Sheets", "Zapier"]),
            automation("Cleaner performance review every 90 days", "Open a review task for each cleaner every quarter.", Easy, "1 hour", "$0-10/month", Low, &["Asana", "Google Calendar"]),
            automation("Auto-email when supplies drop below stock level", "Email a reorder request when supply counts fall below par.", Moderate, "2-3 hours", "$0-15/month", Medium, &["Google Sheets", "Gmail"]),
            automation("Geofence tracking for mobile crews", "Record when crews enter and leave client properties.", Hard, "6-8 hours", "$20-50/month", Medium, &["Connecteam", "Google Maps"]),
            automation("Send client notes to cleaner before job", "Share access codes, pet info, and preferences before arrival.", Easy, "1 hour", "$0-15/month", High, &["Jobber", "Twilio"]),
            automation("Employee reward points system tracker", "Award points for five-star ratings and perfect attendance.", Moderate, "3-5 hours", "$0-20/month", Low, &["Google Sheets", "Slack"]),
            automation("Trigger onboarding for new hires", "Send paperwork, training links, and a welcome kit when someone is hired.", Moderate, "2-4 hours", "$0-25/month", Medium, &["Gusto", "Google Drive"]),
            automation("Certification or training renewal reminders", "Warn staff and managers before certifications expire.", Easy, "1 hour", "$0-10/month", Low, &["Google Calendar"]),
            automation("Auto-send route changes via SMS", "Text crews immediately when their route is updated.", Easy, "1 hour", "$5-20/month", Medium, &["Twilio", "Jobber"]),
            automation("Auto-log hours into payroll system", "Push approved hours into payroll without re-keying.", Moderate, "3-4 hours", "$0-30/month", High, &["Gusto", "QuickBooks"]),
        ],
    )
    .with_color("#C73E1D")
}

/// Lead generation, nurturing, and reviews.
pub fn marketing_and_sales() -> Category {
    Category::new(
        "Marketing & Sales",
        "📈",
        vec![
            automation("Abandoned quote follow-up email", "Follow up on quotes that were requested but never booked.", Easy, "1 hour", "$0-20/month", High, &["Mailchimp", "HubSpot"]),
            automation("Lead magnet download → 5-day nurture sequence", "Send a five-email nurture series after a guide is downloaded.", Moderate, "3-5 hours", "$10-30/month", Medium, &["ConvertKit", "Mailchimp"]),
            automation("Auto-tag lead source (Facebook, Google, etc.)", "Record where each lead came from for attribution.", Easy, "1 hour", "$0-15/month", Medium, &["HubSpot", "Zapier"]),
            automation("Google Review + Yelp review link SMS", "Text happy clients direct links to leave reviews.", Easy, "30 minutes", "$5-15/month", High, &["Twilio", "NiceJob"]),
            automation("Win-back emails for old customers", "Invite lapsed customers back with a personal message.", Easy, "1-2 hours", "$0-20/month", Medium, &["Mailchimp"]),
            automation("Auto-post testimonials to website", "Publish five-star testimonials to the website automatically.", Moderate, "2-3 hours", "$0-20/month", Low, &["WordPress", "Zapier"]),
            automation("Send referral program invite after 3 jobs", "Invite satisfied clients to the referral program after their third visit.", Easy, "1 hour", "$0-20/month", High, &["ReferralCandy", "Mailchimp"]),
            automation("Weekly email newsletter automation", "Assemble and send a weekly newsletter with tips and offers.", Moderate, "2-3 hours", "$10-30/month", Low, &["Mailchimp"]),
            automation("Reactivate cold leads with discount offer", "Send a limited-time discount to leads that went quiet.", Easy, "1 hour", "$0-20/month", Medium, &["HubSpot", "Mailchimp"]),
            automation("Instagram post scheduling", "Queue before/after posts to publish on a schedule.", Easy, "1 hour", "$0-15/month", Low, &["Buffer", "Later"]),
            automation("Auto-detect and email duplicate leads", "Merge or flag leads that arrive twice from different forms.", Moderate, "2-3 hours", "$0-20/month", Low, &["HubSpot", "Zapier"]),
            automation("Trigger a call task for high-interest leads", "Create a call task when a lead opens a quote several times.", Moderate, "2 hours", "$0-20/month", High, &["HubSpot"]),
            automation("Send seasonal promo campaigns (e.g., spring cleaning)", "Launch pre-built campaigns around seasonal demand peaks.", Easy, "1-2 hours", "$10-30/month", Medium, &["Mailchimp"]),
            automation("Add new leads from Facebook Ads to CRM", "Sync lead ad submissions into the CRM in real time.", Easy, "1 hour", "$0-20/month", High, &["Facebook Lead Ads", "HubSpot", "Zapier"]),
            automation("Auto-score leads based on form inputs", "Rank leads by home size, frequency, and budget answers.", Hard, "4-6 hours", "$0-30/month", Medium, &["HubSpot", "Typeform"]),
        ],
    )
    .with_color("#6A994E")
}

/// Client-facing messaging.
pub fn customer_communication() -> Category {
    Category::new(
        "Customer Communication",
        "💬",
        vec![
            automation("Two-way SMS integration for support", "Let clients text the office and get replies from one shared inbox.", Moderate, "3-4 hours", "$20-50/month", High, &["Twilio", "OpenPhone"]),
            automation("Auto-respond to website chat inquiries", "Answer common chat questions instantly and capture contact details.", Moderate, "2-4 hours", "$0-40/month", Medium, &["Tidio", "Intercom"]),
            automation("Missed call → auto-text \"How can we help?\"", "Text callers back automatically when a call goes unanswered.", Easy, "30 minutes", "$5-20/month", High, &["OpenPhone", "Twilio"]),
            automation("Job status updates via SMS (\"In Progress,\" \"Completed\")", "Keep clients informed as the crew starts and finishes.", Moderate, "2-3 hours", "$10-30/month", Medium, &["Jobber", "Twilio"]),
            automation("Auto-email of cleaner profile before visit", "Introduce the assigned cleaner with a photo and short bio.", Easy, "1 hour", "$0-10/month", Low, &["Mailchimp", "Jobber"]),
            automation("Send delay notifications via SMS", "Warn clients when the crew is running late.", Easy, "1 hour", "$5-20/month", Medium, &["Twilio"]),
            automation("Auto-notify customer when cleaner is nearby", "Send a heads-up when the crew is a few minutes away.", Hard, "5-8 hours", "$20-50/month", Medium, &["Google Maps", "Twilio"]),
            automation("Service reminder emails (weekly, biweekly, etc.)", "Remind clients of upcoming visits on their service cadence.", Easy, "1 hour", "$0-15/month", Medium, &["Mailchimp", "Jobber"]),
            automation("\"You're next\" job notification for clients", "Notify the client when their job is the crew's next stop.", Moderate, "2-3 hours", "$10-30/month", Low, &["Jobber", "Twilio"]),
            automation("Set auto-replies for off-hours contact", "Reply outside business hours with expected response times.", Easy, "30 minutes", "$0", Low, &["Gmail", "OpenPhone"]),
        ],
    )
    .with_color("#7209B7")
}

/// Owner-facing reports and dashboards.
pub fn reporting_and_analytics() -> Category {
    Category::new(
        "Reporting & Analytics",
        "📊",
        vec![
            automation("Weekly revenue report emailed to owner", "Email the owner a revenue summary every Monday.", Easy, "1-2 hours", "$0-15/month", High, &["QuickBooks", "Google Sheets"]),
            automation("Auto-generate monthly KPI dashboard", "Build a monthly dashboard of bookings, revenue, and retention.", Moderate, "4-6 hours", "$0-30/month", Medium, &["Looker Studio", "Google Sheets"]),
            automation("New client acquisition report", "Count new clients by source every month.", Easy, "1-2 hours", "$0-15/month", Medium, &["HubSpot", "Google Sheets"]),
            automation("Cleaner performance heatmap", "Visualize ratings and job times per cleaner and weekday.", Hard, "6-8 hours", "$0-30/month", Low, &["Looker Studio"]),
            automation("Missed job or reschedule frequency report", "Track how often jobs are missed or moved, and why.", Moderate, "2-3 hours", "$0-15/month", Medium, &["Jobber", "Google Sheets"]),
            automation("Auto-track ad spend vs. bookings", "Compare ad spend with the bookings it produced.", Moderate, "3-4 hours", "$0-20/month", High, &["Google Ads", "Facebook Ads", "Google Sheets"]),
            automation("Most-requested services chart", "Chart which services and add-ons are booked most.", Easy, "1-2 hours", "$0-10/month", Low, &["Google Sheets"]),
            automation("Net Promoter Score (NPS) tracking", "Survey clients quarterly and trend the NPS result.", Moderate, "2-3 hours", "$0-25/month", Medium, &["Delighted", "Google Forms"]),
            automation("Client lifetime value calculator", "Compute lifetime value per client from payment history.", Hard, "4-6 hours", "$0-20/month", Medium, &["Google Sheets", "QuickBooks"]),
            automation("Export all data monthly to cloud drive", "Back up client, job, and payment exports every month.", Easy, "1 hour", "$0-10/month", Low, &["Google Drive", "Zapier"]),
        ],
    )
    .with_color("#FF6B35")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_category_sizes() {
        assert_eq!(client_onboarding().item_count(), 15);
        assert_eq!(booking_and_scheduling().item_count(), 15);
        assert_eq!(payments_and_invoicing().item_count(), 15);
        assert_eq!(team_operations().item_count(), 20);
        assert_eq!(marketing_and_sales().item_count(), 15);
        assert_eq!(customer_communication().item_count(), 10);
        assert_eq!(reporting_and_analytics().item_count(), 10);
    }

    #[test]
    fn test_every_builtin_record_has_metadata() {
        for category in categories() {
            assert!(!category.icon.is_empty());
            assert!(category.color.is_some());
            for record in &category.items {
                assert!(!record.description.is_empty(), "{}", record.name);
                assert!(!record.time_estimate.is_empty(), "{}", record.name);
                assert!(!record.cost_estimate.is_empty(), "{}", record.name);
                assert!(!record.tools.is_empty(), "{}", record.name);
            }
        }
    }

    #[test]
    fn test_eta_record_is_medium_difficulty() {
        let booking = booking_and_scheduling();
        let eta = booking
            .items
            .iter()
            .find(|r| r.name.starts_with("Send ETA texts"))
            .unwrap();
        assert_eq!(eta.difficulty, Difficulty::Medium);
    }
}
