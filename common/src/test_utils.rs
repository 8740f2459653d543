use solana_sdk::{
    hash::Hash,
    instruction::{AccountMeta, Instruction},
    message::{v0, Message, MessageHeader, VersionedMessage},
    pubkey::Pubkey,
    signature::Signature,
    transaction::VersionedTransaction,
};

/// A v0 transaction paid by `payer` that also needs `extra_signers`, with
/// every signature slot still empty.
pub fn unsigned_transaction(payer: &Pubkey, extra_signers: &[Pubkey]) -> VersionedTransaction {
    let mut accounts = vec![AccountMeta::new(*payer, true)];
    accounts.extend(extra_signers.iter().map(|k| AccountMeta::new_readonly(*k, true)));
    let ix = Instruction::new_with_bytes(Pubkey::new_unique(), &[1, 2, 3], accounts);

    let message = v0::Message::try_compile(payer, &[ix], &[], Hash::new_unique()).unwrap();
    let required = usize::from(message.header.num_required_signatures);

    VersionedTransaction {
        signatures: vec![Signature::default(); required],
        message: VersionedMessage::V0(message),
    }
}

/// The base64 wire form the build endpoint hands back.
pub fn encoded_transaction(payer: &Pubkey, extra_signers: &[Pubkey]) -> String {
    let tx = unsigned_transaction(payer, extra_signers);
    base64::encode(bincode::serialize(&tx).unwrap())
}

/// A legacy transaction whose header claims two signers but which only
/// carries `payer` as an account key.
pub fn overclaiming_transaction(payer: &Pubkey) -> VersionedTransaction {
    let message = Message {
        header: MessageHeader {
            num_required_signatures: 2,
            num_readonly_signed_accounts: 0,
            num_readonly_unsigned_accounts: 0,
        },
        account_keys: vec![*payer],
        recent_blockhash: Hash::new_unique(),
        instructions: vec![],
    };

    VersionedTransaction {
        signatures: vec![Signature::default(); 2],
        message: VersionedMessage::Legacy(message),
    }
}
