extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events, Ledger},
    token, vec, Address, Env, IntoVal, String, TryIntoVal,
};

use crate::events::{CampaignCreated, Contribution, Refund, StateChanged, Withdrawal};
use crate::{CampaignState, Crowdfund, CrowdfundClient};

fn setup() -> (Env, CrowdfundClient<'static>) {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(Crowdfund, ());
    let client = CrowdfundClient::new(&env, &contract_id);
    (env, client)
}

fn create_token<'a>(env: &Env, admin: &Address) -> token::Client<'a> {
    let addr = env.register_stellar_asset_contract_v2(admin.clone());
    token::Client::new(env, &addr.address())
}

fn setup_active(
    goal: i128,
) -> (Env, CrowdfundClient<'static>, token::Client<'static>, Address) {
    let (env, client) = setup();
    let owner = Address::generate(&env);
    let token = create_token(&env, &Address::generate(&env));
    client.init(
        &owner,
        &token.address,
        &String::from_str(&env, "Water well"),
        &goal,
        &7,
    );
    client.start(&owner);
    (env, client, token, owner)
}

fn contribute(env: &Env, client: &CrowdfundClient, token: &token::Client, amount: i128) -> Address {
    let contributor = Address::generate(env);
    token::StellarAssetClient::new(env, &token.address).mint(&contributor, &amount);
    client.contribute(&contributor, &amount);
    contributor
}

#[test]
fn test_campaign_created_event() {
    let (env, client) = setup();
    let owner = Address::generate(&env);
    let token = create_token(&env, &Address::generate(&env));
    let name = String::from_str(&env, "Water well");

    let info = client.init(&owner, &token.address, &name, &500, &7);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![&env, symbol_short!("created").into_val(&env)];
    assert_eq!(last_event.1, expected_topics);

    let event_data: CampaignCreated = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        CampaignCreated {
            owner,
            token: token.address.clone(),
            name,
            goal: 500,
            deadline: info.deadline,
        }
    );
}

#[test]
fn test_start_emits_state_changed() {
    let (env, _, _, _) = setup_active(500);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    let expected_topics = vec![&env, symbol_short!("state").into_val(&env)];
    assert_eq!(last_event.1, expected_topics);

    let event_data: StateChanged = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        StateChanged {
            old: CampaignState::Preparing,
            new: CampaignState::Active,
        }
    );
}

#[test]
fn test_contribution_event() {
    let (env, client, token, _) = setup_active(500);
    let contributor = contribute(&env, &client, &token, 75);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("contrib").into_val(&env),
        contributor.clone().into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: Contribution = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        Contribution {
            contributor,
            amount: 75,
        }
    );
}

#[test]
fn test_withdrawal_events() {
    let (env, client, token, owner) = setup_active(100);
    contribute(&env, &client, &token, 120);
    env.ledger().set_timestamp(client.deadline());
    client.finalize();

    client.withdraw(&owner);

    // The escrow's own records are the last two, after the token's transfer event.
    let ours: std::vec::Vec<_> = env
        .events()
        .all()
        .iter()
        .filter(|event| event.0 == client.address)
        .collect();
    let n = ours.len();

    let closed: StateChanged = ours[n - 2].2.try_into_val(&env).unwrap();
    assert_eq!(
        closed,
        StateChanged {
            old: CampaignState::Success,
            new: CampaignState::Closed,
        }
    );

    let expected_topics = vec![
        &env,
        symbol_short!("withdraw").into_val(&env),
        owner.clone().into_val(&env),
    ];
    assert_eq!(ours[n - 1].1, expected_topics);
    let withdrawal: Withdrawal = ours[n - 1].2.try_into_val(&env).unwrap();
    assert_eq!(
        withdrawal,
        Withdrawal {
            owner,
            amount: 120,
        }
    );
}

#[test]
fn test_refund_event() {
    let (env, client, token, _) = setup_active(100);
    let contributor = contribute(&env, &client, &token, 40);
    env.ledger().set_timestamp(client.deadline());
    assert_eq!(client.finalize(), CampaignState::Failed);

    client.refund(&contributor);

    let ours: std::vec::Vec<_> = env
        .events()
        .all()
        .iter()
        .filter(|event| event.0 == client.address)
        .collect();
    let last_event = ours.last().expect("No events found");

    let expected_topics = vec![
        &env,
        symbol_short!("refund").into_val(&env),
        contributor.clone().into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: Refund = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        Refund {
            contributor,
            amount: 40,
        }
    );
}
